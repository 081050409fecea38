use serde::{Deserialize, Serialize};

use crate::ConfigurationProblem;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MemoryConfiguration {
    /// Where the application stages a downloaded image.
    pub backup_image_start: u32,
    /// Where the bootloader launches the application from.
    pub main_image_start: u32,
    pub image_length: u32,
    /// Size of the smallest erasable main flash region.
    pub sector_size: u32,
    /// Everything from here upwards belongs to the bootloader.
    pub boot_image_start: u32,
    pub reset_vector: u32,
    pub reset_vector_width: u32,
    pub app_vector_table: u32,
    pub boot_record: u32,
    pub app_record: u32,
    pub info_segment_size: u32,
}

impl MemoryConfiguration {
    pub fn backup_image_end(&self) -> u32 { self.backup_image_start + self.image_length }
    pub fn main_image_end(&self) -> u32 { self.main_image_start + self.image_length }

    fn segment_of(&self, address: u32) -> u32 { address / self.info_segment_size }

    pub fn problems(&self) -> impl Iterator<Item = ConfigurationProblem> {
        let aligned = |a: u32| self.sector_size != 0 && a % self.sector_size == 0;
        let lowest_image = self.backup_image_start.min(self.main_image_start);
        let overlapping = self.backup_image_start < self.main_image_end()
            && self.main_image_start < self.backup_image_end();

        [
            (!(aligned(self.backup_image_start)
                && aligned(self.main_image_start)
                && aligned(self.image_length)))
            .then_some(ConfigurationProblem::MisalignedImage),
            overlapping.then_some(ConfigurationProblem::ImagesOverlap),
            (self.main_image_end() > self.boot_image_start)
                .then_some(ConfigurationProblem::ImageOverlapsBootloader),
            (self.reset_vector < self.main_image_start
                || self.reset_vector + self.reset_vector_width > self.main_image_end())
            .then_some(ConfigurationProblem::ResetVectorOutsideImage),
            (self.app_vector_table > self.reset_vector)
                .then_some(ConfigurationProblem::VectorTableAfterResetVector),
            (self.boot_record + self.info_segment_size > lowest_image
                || self.app_record + self.info_segment_size > lowest_image)
                .then_some(ConfigurationProblem::RecordsOverlapFlash),
            (self.info_segment_size == 0
                || self.segment_of(self.boot_record) == self.segment_of(self.app_record))
            .then_some(ConfigurationProblem::RecordsShareSegment),
        ]
        .into_iter()
        .flatten()
    }
}
