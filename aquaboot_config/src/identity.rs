use serde::{Deserialize, Serialize};

/// Identity fields stamped into every message the bootloader sends.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub product_id: u8,
    pub firmware_major: u8,
    pub firmware_minor: u8,
}
