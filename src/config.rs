#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::time::Duration;

use crate::sequencing::VolumeRange;

/// Default loop length
pub const DEFAULT_LOOP_LENGTH: Duration = Duration::from_secs(10);

/// Sequencer settings
///
/// ```
/// use std::time::Duration;
/// use theremax::TheremaxConfig;
///
/// let config = TheremaxConfig::new()
///     .loop_length(Duration::from_secs(8))
///     .volume_range(-30.0, -3.0);
/// assert_eq!(config.loop_length_ms(), 8_000);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TheremaxConfig {
    /// Wall-clock length of one loop iteration
    pub loop_length: Duration,
    /// Volume span of the vertical axis
    pub volume: VolumeRange,
}

impl TheremaxConfig {
    pub fn new() -> Self {
        Self {
            loop_length: DEFAULT_LOOP_LENGTH,
            volume: VolumeRange::default(),
        }
    }

    /// Set the loop length
    pub fn loop_length(mut self, loop_length: Duration) -> Self {
        self.loop_length = loop_length;
        self
    }

    /// Set the loop length in milliseconds
    pub fn loop_length_millis(self, millis: u32) -> Self {
        self.loop_length(Duration::from_millis(millis as u64))
    }

    /// Set the volume at the top (`min_db`) and bottom (`max_db`) edges
    pub fn volume_range(mut self, min_db: f64, max_db: f64) -> Self {
        self.volume = VolumeRange { min_db, max_db };
        self
    }

    /// Loop length in whole milliseconds, saturating at `u32::MAX`.
    pub fn loop_length_ms(&self) -> u32 {
        self.loop_length.as_millis().min(u32::MAX as u128) as u32
    }
}

impl Default for TheremaxConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_loop_is_ten_seconds() {
        let config = TheremaxConfig::default();
        assert_eq!(config.loop_length_ms(), 10_000);
        assert_eq!(config.volume, VolumeRange { min_db: -40.0, max_db: 0.0 });
    }

    #[test]
    fn builder_sets_fields() {
        let config = TheremaxConfig::new()
            .loop_length_millis(2_500)
            .volume_range(-12.0, -1.0);
        assert_eq!(config.loop_length, Duration::from_millis(2_500));
        assert_eq!(config.volume.min_db, -12.0);
        assert_eq!(config.volume.max_db, -1.0);
    }
}
