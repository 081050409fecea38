use serde::{Deserialize, Serialize};

use crate::ConfigurationProblem;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimingConfiguration {
    /// Period of the system tick driving every state machine.
    pub tick_ms: u32,
    pub transaction_timeout_s: u32,
    pub transaction_retries: u8,
    pub ota_retries: u8,
    pub shutdown_settle_s: u32,
    /// Ceiling on modem up-time while waiting for a network link.
    pub link_wait_s: u32,
    pub sos_sleep_h: u32,
    /// Reboots tolerated without an app record before entering SOS.
    pub max_boot_count: u16,
    pub copy_attempts: u8,
    /// Bound on flash controller busy polls per operation.
    pub busy_wait_polls: u16,
}

impl TimingConfiguration {
    pub fn sos_sleep_ticks(&self) -> u32 {
        if self.tick_ms == 0 {
            0
        } else {
            self.sos_sleep_h * 60 * 60 * 1000 / self.tick_ms
        }
    }

    pub fn problems(&self) -> impl Iterator<Item = ConfigurationProblem> {
        [
            (self.transaction_timeout_s == 0).then_some(ConfigurationProblem::ZeroTimeout),
            (self.copy_attempts == 0).then_some(ConfigurationProblem::NoCopyAttempts),
            (self.tick_ms == 0 || self.tick_ms >= 1000).then_some(ConfigurationProblem::TickTooLong),
        ]
        .into_iter()
        .flatten()
    }
}
