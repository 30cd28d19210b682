//! Visualization contract the sequencer draws through
//!
//! The sequencer never draws. It tells a [`Visualization`] when a track's
//! line starts, which points were revealed, and when the loop wrapped.

pub mod canvas;

pub use canvas::{LineCanvas, Rgb, PALETTE};

use crate::sequencing::TrackId;

/// A position on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canvas size in the same units as gesture coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Receiver of replayed gesture points
pub trait Visualization {
    /// Drop every drawn line (loop wrapped or sequencer reset).
    fn clear_lines(&mut self);

    /// Start the line of `track` at its first replayed point.
    fn create_line(&mut self, point: Point, track: TrackId);

    /// Extend the line of `track` with newly replayed points.
    fn add_points(&mut self, points: &[Point], track: TrackId);

    /// Canvas size used to scale positions into pitch and volume.
    fn dimensions(&self) -> Dimensions;
}

/// Allow boxed visualizations (for dynamic dispatch)
impl Visualization for Box<dyn Visualization> {
    fn clear_lines(&mut self) {
        (**self).clear_lines()
    }

    fn create_line(&mut self, point: Point, track: TrackId) {
        (**self).create_line(point, track)
    }

    fn add_points(&mut self, points: &[Point], track: TrackId) {
        (**self).add_points(points, track)
    }

    fn dimensions(&self) -> Dimensions {
        (**self).dimensions()
    }
}
