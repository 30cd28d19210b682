//! Linear mapping from gesture space into pitch and volume space

use crate::visual::{Dimensions, Point};

/// Linear interpolation of `value` from `[src_min, src_max]` into
/// `[dst_min, dst_max]`.
///
/// No clamping: values outside the source range extrapolate, which keeps
/// gestures slightly past the canvas edge meaningful. A zero-width source
/// range maps everything to `dst_min`.
#[inline]
pub fn lerp(value: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> f64 {
    let src_range = src_max - src_min;
    if src_range == 0.0 {
        return dst_min;
    }
    let dst_range = dst_max - dst_min;
    (value - src_min) * dst_range / src_range + dst_min
}

/// Volume range in decibels that the vertical axis spans
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeRange {
    /// Volume at the top edge (y = 0)
    pub min_db: f64,
    /// Volume at the bottom edge (y = height)
    pub max_db: f64,
}

impl Default for VolumeRange {
    fn default() -> Self {
        Self {
            min_db: -40.0,
            max_db: 0.0,
        }
    }
}

/// A gesture position resolved into instrument parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Horizontal position normalized to roughly `[0, 1]`
    pub pitch: f64,
    /// Volume in dB
    pub volume_db: f64,
}

/// Resolve a canvas position into pitch and volume.
pub fn scale_point(point: Point, dimensions: Dimensions, volume: VolumeRange) -> Note {
    Note {
        pitch: lerp(point.x, 0.0, dimensions.width, 0.0, 1.0),
        volume_db: lerp(
            point.y,
            0.0,
            dimensions.height,
            volume.min_db,
            volume.max_db,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_maps_endpoints_and_midpoint() {
        assert_eq!(lerp(0.0, 0.0, 10.0, 100.0, 200.0), 100.0);
        assert_eq!(lerp(10.0, 0.0, 10.0, 100.0, 200.0), 200.0);
        assert_eq!(lerp(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
    }

    #[test]
    fn lerp_extrapolates_outside_source_range() {
        assert_eq!(lerp(12.0, 0.0, 10.0, 0.0, 1.0), 1.2);
        assert_eq!(lerp(-5.0, 0.0, 10.0, 0.0, 1.0), -0.5);
    }

    #[test]
    fn lerp_handles_inverted_target() {
        assert_eq!(lerp(0.25, 0.0, 1.0, 2000.0, 20.0), 1505.0);
    }

    #[test]
    fn lerp_degenerate_source_maps_to_target_min() {
        assert_eq!(lerp(3.0, 4.0, 4.0, -1.0, 1.0), -1.0);
    }

    #[test]
    fn scale_point_uses_canvas_dimensions() {
        let note = scale_point(
            Point::new(200.0, 50.0),
            Dimensions::new(800.0, 100.0),
            VolumeRange::default(),
        );
        assert_eq!(note.pitch, 0.25);
        assert_eq!(note.volume_db, -20.0);
    }
}
