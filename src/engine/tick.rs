use crate::sequencing::TrackId;
use crate::visual::Point;

/// Points one track revealed during a tick
#[derive(Debug, Clone, PartialEq)]
pub struct Revealed {
    pub track: TrackId,
    /// First points of this track in the current loop iteration
    pub started: bool,
    /// Newly due positions, consecutive duplicates collapsed
    pub points: Vec<Point>,
}

/// Result of one [`Theremax::tick`](super::Theremax::tick)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tick {
    /// Loop time the tick resolved against
    pub elapsed_ms: u32,
    /// The loop wrapped on this tick; nothing else was processed
    pub looped: bool,
    /// Per-track newly due points, in track creation order
    pub revealed: Vec<Revealed>,
}

impl Tick {
    pub(crate) fn at(elapsed_ms: u32) -> Self {
        Self {
            elapsed_ms,
            looped: false,
            revealed: Vec::new(),
        }
    }

    pub(crate) fn wrapped() -> Self {
        Self {
            elapsed_ms: 0,
            looped: true,
            revealed: Vec::new(),
        }
    }

    /// No track revealed anything.
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn points_for(&self, track: TrackId) -> Option<&[Point]> {
        self.revealed
            .iter()
            .find(|r| r.track == track)
            .map(|r| r.points.as_slice())
    }
}
