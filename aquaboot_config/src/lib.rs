//! This aquaboot sub-crate contains all definitions to help generate
//! the final aquaboot library.
//!
//! NOTE: This code is not included anywhere from aquaboot itself! This
//! is a dependency of the aquaboot **build script**. The build script
//! uses this dependency to validate a board configuration and generate
//! the constants that aquaboot includes (memory map, timing, identity).

use std::fmt::Display;

use identity::Identity;
use memory::MemoryConfiguration;
use serde::{Deserialize, Serialize};
use timing::TimingConfiguration;

pub mod codegen;
pub mod identity;
pub mod memory;
pub mod timing;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Configuration {
    pub memory: MemoryConfiguration,
    pub timing: TimingConfiguration,
    pub identity: Identity,
}

impl Configuration {
    pub fn is_valid(&self) -> bool { self.problems().next().is_none() }

    /// Lists every inconsistency that would make the generated
    /// constants unusable on a board.
    pub fn problems(&self) -> impl Iterator<Item = ConfigurationProblem> + '_ {
        self.memory.problems().chain(self.timing.problems())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigurationProblem {
    MisalignedImage,
    ImagesOverlap,
    ImageOverlapsBootloader,
    ResetVectorOutsideImage,
    VectorTableAfterResetVector,
    RecordsOverlapFlash,
    RecordsShareSegment,
    ZeroTimeout,
    NoCopyAttempts,
    TickTooLong,
}

impl Display for ConfigurationProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ConfigurationProblem::MisalignedImage => {
                "[Memory Map] Image start addresses and length must be sector aligned"
            }
            ConfigurationProblem::ImagesOverlap => "[Memory Map] Backup and main images overlap",
            ConfigurationProblem::ImageOverlapsBootloader => {
                "[Memory Map] Main image must end at or below the boot image"
            }
            ConfigurationProblem::ResetVectorOutsideImage => {
                "[Memory Map] Application reset vector must lie inside the main image"
            }
            ConfigurationProblem::VectorTableAfterResetVector => {
                "[Memory Map] Application vector table must start below the reset vector"
            }
            ConfigurationProblem::RecordsOverlapFlash => {
                "[Memory Map] Boot and app records must live below both images"
            }
            ConfigurationProblem::RecordsShareSegment => {
                "[Memory Map] Boot and app records must live in different segments"
            }
            ConfigurationProblem::ZeroTimeout => "[Timing] Transaction timeout can't be zero",
            ConfigurationProblem::NoCopyAttempts => "[Timing] At least one copy attempt is required",
            ConfigurationProblem::TickTooLong => "[Timing] Tick must be shorter than a second",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE: &str = include_str!("../sample_configurations/afridev_v2.ron");

    #[test]
    fn sample_configuration_is_valid() {
        let configuration: Configuration = ron::from_str(SAMPLE).unwrap();
        assert!(configuration.is_valid(), "{:?}", configuration.problems().collect::<Vec<_>>());
        assert_eq!(configuration.memory.main_image_end(), 0xDA00);
        assert_eq!(configuration.timing.sos_sleep_ticks(), 86_400);
    }

    #[test]
    fn overlapping_images_are_rejected() {
        let mut configuration: Configuration = ron::from_str(SAMPLE).unwrap();
        configuration.memory.backup_image_start += configuration.memory.sector_size;
        assert!(configuration.problems().any(|p| p == ConfigurationProblem::ImagesOverlap));
    }

    #[test]
    fn reset_vector_must_be_inside_the_main_image() {
        let mut configuration: Configuration = ron::from_str(SAMPLE).unwrap();
        configuration.memory.reset_vector = configuration.memory.boot_image_start;
        assert!(configuration
            .problems()
            .any(|p| p == ConfigurationProblem::ResetVectorOutsideImage));
    }
}
