//! Generates the `configuration.rs` module included by the aquaboot
//! library, turning a validated board description into constants.
use std::{fs::OpenOptions, io::Write, path::Path};

use anyhow::{anyhow, Result};
use proc_macro2::TokenStream;
use quote::quote;

use crate::{memory::MemoryConfiguration, timing::TimingConfiguration, Configuration};

pub const GENERATED_FILENAME: &str = "configuration.rs";

/// Validates the configuration and writes the generated module to `out_dir`.
pub fn generate_modules<P: AsRef<Path>>(out_dir: P, configuration: &Configuration) -> Result<()> {
    if let Some(problem) = configuration.problems().next() {
        return Err(anyhow!("Invalid configuration: {}", problem));
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(out_dir.as_ref().join(GENERATED_FILENAME))?;

    file.write_all(format!("{}", generate_configuration(configuration)).as_bytes())?;
    Ok(())
}

pub fn generate_configuration(configuration: &Configuration) -> TokenStream {
    let memory = generate_memory_map(&configuration.memory);
    let timing = generate_timing(&configuration.timing);
    let product_id = configuration.identity.product_id;
    let firmware_major = configuration.identity.firmware_major;
    let firmware_minor = configuration.identity.firmware_minor;

    quote! {
        pub const CONFIGURATION: crate::config::Configuration = crate::config::Configuration {
            memory: #memory,
            timing: #timing,
            identity: crate::config::Identity {
                product_id: #product_id,
                firmware_major: #firmware_major,
                firmware_minor: #firmware_minor,
            },
        };
    }
}

fn generate_memory_map(memory: &MemoryConfiguration) -> TokenStream {
    let backup_start = memory.backup_image_start;
    let backup_end = memory.backup_image_end();
    let main_start = memory.main_image_start;
    let main_end = memory.main_image_end();
    let sector_size = memory.sector_size;
    let boot_start = memory.boot_image_start;
    let reset_vector = memory.reset_vector;
    let reset_vector_width = memory.reset_vector_width;
    let app_vector_table = memory.app_vector_table;
    let boot_record = memory.boot_record;
    let app_record = memory.app_record;

    quote! {
        crate::utilities::memory::MemoryMap {
            backup: crate::utilities::memory::FlashRegion { start: #backup_start, end: #backup_end },
            main: crate::utilities::memory::FlashRegion { start: #main_start, end: #main_end },
            sector_size: #sector_size,
            boot_start: #boot_start,
            reset_vector: #reset_vector,
            reset_vector_width: #reset_vector_width,
            app_vector_table: #app_vector_table,
            boot_record: #boot_record,
            app_record: #app_record,
        }
    }
}

fn generate_timing(timing: &TimingConfiguration) -> TokenStream {
    let tick = timing.tick_ms;
    let transaction_timeout = timing.transaction_timeout_s * 1000;
    let transaction_retries = timing.transaction_retries;
    let ota_retries = timing.ota_retries;
    let shutdown_settle = timing.shutdown_settle_s * 1000;
    let link_wait = timing.link_wait_s * 1000;
    let sos_sleep_ticks = timing.sos_sleep_ticks();
    let max_boot_count = timing.max_boot_count;
    let copy_attempts = timing.copy_attempts;
    let busy_wait_polls = timing.busy_wait_polls;

    quote! {
        crate::config::Timing {
            tick: crate::hal::time::Milliseconds(#tick),
            transaction_timeout: crate::hal::time::Milliseconds(#transaction_timeout),
            transaction_retries: #transaction_retries,
            ota_retries: #ota_retries,
            shutdown_settle: crate::hal::time::Milliseconds(#shutdown_settle),
            link_wait: crate::hal::time::Milliseconds(#link_wait),
            sos_sleep_ticks: #sos_sleep_ticks,
            max_boot_count: #max_boot_count,
            copy_attempts: #copy_attempts,
            busy_wait_polls: #busy_wait_polls,
        }
    }
}
