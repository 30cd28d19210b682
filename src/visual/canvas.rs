//! In-memory line canvas
//!
//! Keeps one polyline per track so a frontend can draw them however it
//! likes. Colours cycle through a fixed palette by track id.

use std::collections::BTreeMap;

use super::{Dimensions, Point, Visualization};
use crate::sequencing::TrackId;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn hex(colour: u32) -> Self {
        Self(
            ((colour >> 16) & 0xFF) as u8,
            ((colour >> 8) & 0xFF) as u8,
            (colour & 0xFF) as u8,
        )
    }
}

pub const PALETTE: [Rgb; 12] = [
    Rgb::hex(0x00ff00),
    Rgb::hex(0xff0000),
    Rgb::hex(0x0000ff),
    Rgb::hex(0xffff00),
    Rgb::hex(0xff00ff),
    Rgb::hex(0x00ffff),
    Rgb::hex(0xff8800),
    Rgb::hex(0x00ff88),
    Rgb::hex(0x8800ff),
    Rgb::hex(0x88ff00),
    Rgb::hex(0x0088ff),
    Rgb::hex(0xff0088),
];

/// Visualization that stores replayed lines
#[derive(Debug, Clone, Default)]
pub struct LineCanvas {
    dimensions: Dimensions,
    lines: BTreeMap<TrackId, Vec<Point>>,
}

impl LineCanvas {
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            lines: BTreeMap::new(),
        }
    }

    /// Change the canvas size. Existing points keep their coordinates.
    pub fn resize(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    /// Drawn lines ordered by track id.
    pub fn lines(&self) -> impl Iterator<Item = (TrackId, &[Point])> {
        self.lines.iter().map(|(id, points)| (*id, points.as_slice()))
    }

    pub fn line(&self, track: TrackId) -> Option<&[Point]> {
        self.lines.get(&track).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Palette colour of a track's line.
    pub fn colour(track: TrackId) -> Rgb {
        PALETTE[track.0 as usize % PALETTE.len()]
    }
}

impl Visualization for LineCanvas {
    fn clear_lines(&mut self) {
        self.lines.clear();
    }

    fn create_line(&mut self, point: Point, track: TrackId) {
        self.lines.insert(track, vec![point]);
    }

    fn add_points(&mut self, points: &[Point], track: TrackId) {
        self.lines.entry(track).or_default().extend_from_slice(points);
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_line_replaces_previous_line() {
        let mut canvas = LineCanvas::new(Dimensions::new(10.0, 10.0));
        canvas.create_line(Point::new(1.0, 1.0), TrackId(3));
        canvas.add_points(&[Point::new(2.0, 2.0)], TrackId(3));
        canvas.create_line(Point::new(5.0, 5.0), TrackId(3));

        assert_eq!(canvas.line(TrackId(3)), Some(&[Point::new(5.0, 5.0)][..]));
    }

    #[test]
    fn add_points_without_line_starts_one() {
        let mut canvas = LineCanvas::default();
        canvas.add_points(&[Point::new(1.0, 2.0)], TrackId(0));
        assert_eq!(canvas.lines().count(), 1);

        canvas.clear_lines();
        assert!(canvas.is_empty());
    }

    #[test]
    fn colours_cycle_by_track_id() {
        assert_eq!(LineCanvas::colour(TrackId(0)), Rgb(0x00, 0xff, 0x00));
        assert_eq!(LineCanvas::colour(TrackId(13)), Rgb(0xff, 0x00, 0x00));
    }
}
