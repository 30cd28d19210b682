//! Track - one pointer's recorded gesture plus its replay cursor
//!
//! Simple model: one track = one pointer = one instrument.
//! Layering is achieved by recording several tracks into the same loop.

use super::error::SequencerError;
use super::sample::{Sample, SampleChain, SampleId};
use crate::instrument::Instrument;
use crate::visual::Point;

/// Identifier of an input pointer (mouse, finger, pen)
pub type PointerId = u32;

/// Unique, monotonically assigned track identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackId(pub u32);

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Pointer still down, samples are being appended
    Recording,
    /// Pointer released, the chain is sealed
    Replaying,
}

/// Outcome of advancing a track's cursor for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    /// The cursor moved onto at least one new sample
    pub advanced: bool,
    /// The cursor was unset before this tick (first due sample of the loop)
    pub started: bool,
}

/// Per-loop playback bookkeeping, cleared when the loop wraps
#[derive(Debug, Default)]
struct Playback {
    /// Last sample fired in this loop iteration
    cursor: Option<SampleId>,
    /// Instrument already stopped after the final sample
    silenced: bool,
    /// Last position sent to `play()`
    last_played: Option<Point>,
    /// Last position handed to the visualization
    last_reported: Option<Point>,
}

/// A recorded gesture
pub struct Track {
    id: TrackId,
    pointer_id: PointerId,
    instrument: Box<dyn Instrument>,
    samples: SampleChain,
    recording: bool,
    playback: Playback,
}

impl Track {
    /// Create a recording track with its first sample at `at_ms`.
    pub fn new(
        id: TrackId,
        pointer_id: PointerId,
        instrument: Box<dyn Instrument>,
        x: f64,
        y: f64,
        at_ms: u32,
    ) -> Self {
        Self {
            id,
            pointer_id,
            instrument,
            samples: SampleChain::new(x, y, at_ms),
            recording: true,
            playback: Playback::default(),
        }
    }

    /// Append a sample to a recording track.
    pub fn append_sample(&mut self, x: f64, y: f64, at_ms: u32) -> Result<(), SequencerError> {
        self.samples.push(x, y, at_ms).map(|_| ())
    }

    /// Stop recording. Irreversible.
    ///
    /// Returns `false` (and changes nothing) if recording had already ended.
    pub fn end_recording(&mut self) -> bool {
        std::mem::replace(&mut self.recording, false)
    }

    // -------------------------------
    // MARK: Playback
    // -------------------------------

    /// Move the cursor over every sample due at `elapsed_ms`.
    ///
    /// Points of newly traversed samples are pushed to `traversed`, with
    /// consecutive identical positions collapsed (also across ticks).
    pub(crate) fn advance(&mut self, elapsed_ms: u32, traversed: &mut Vec<Point>) -> Advance {
        let mut outcome = Advance::default();

        let mut cursor = match self.playback.cursor {
            Some(cursor) => cursor,
            None => {
                let first = self.samples.first();
                if self.samples.get(first).time_ms > elapsed_ms {
                    return outcome;
                }
                outcome.started = true;
                outcome.advanced = true;
                self.report(first, traversed);
                first
            }
        };

        // Drain everything that became due since the last tick
        while let Some(next) = self.samples.get(cursor).next() {
            if self.samples.get(next).time_ms > elapsed_ms {
                break;
            }
            cursor = next;
            outcome.advanced = true;
            self.report(next, traversed);
        }

        self.playback.cursor = Some(cursor);
        outcome
    }

    fn report(&mut self, id: SampleId, traversed: &mut Vec<Point>) {
        let point = self.samples.get(id).point();
        if self.playback.last_reported != Some(point) {
            self.playback.last_reported = Some(point);
            traversed.push(point);
        }
    }

    /// Sealed and already past its final sample for this loop.
    pub fn is_finished(&self, elapsed_ms: u32) -> bool {
        !self.recording && elapsed_ms > self.end_ms()
    }

    /// Stop the instrument once per loop iteration after the final sample.
    ///
    /// Returns `true` when `stop()` was issued by this call.
    pub(crate) fn silence(&mut self) -> bool {
        if self.playback.silenced {
            return false;
        }
        self.playback.silenced = true;
        self.instrument.stop();
        true
    }

    /// Position to play at the cursor, unless it repeats the last one played.
    pub(crate) fn take_note(&mut self) -> Option<Point> {
        let point = self.cursor_sample()?.point();
        if self.playback.last_played == Some(point) {
            return None;
        }
        self.playback.last_played = Some(point);
        Some(point)
    }

    /// Forget loop progress so the next tick replays from the first sample.
    pub(crate) fn rewind(&mut self) {
        self.playback = Playback::default();
    }

    pub(crate) fn instrument_mut(&mut self) -> &mut dyn Instrument {
        self.instrument.as_mut()
    }

    // -------------------------------
    // MARK: Accessors
    // -------------------------------

    #[inline]
    pub fn id(&self) -> TrackId {
        self.id
    }

    #[inline]
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn state(&self) -> TrackState {
        if self.recording {
            TrackState::Recording
        } else {
            TrackState::Replaying
        }
    }

    pub fn instrument(&self) -> &dyn Instrument {
        self.instrument.as_ref()
    }

    /// Number of recorded samples (at least one).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn first_sample(&self) -> &Sample {
        self.samples.get(self.samples.first())
    }

    pub fn last_sample(&self) -> &Sample {
        self.samples.get(self.samples.last())
    }

    /// Last sample fired in the current loop iteration.
    pub fn cursor_sample(&self) -> Option<&Sample> {
        self.playback.cursor.map(|id| self.samples.get(id))
    }

    /// Whether the cursor sits on the final recorded sample.
    pub fn cursor_at_end(&self) -> bool {
        self.playback.cursor == Some(self.samples.last())
    }

    /// Offset of the first sample from loop start.
    pub fn start_ms(&self) -> u32 {
        self.first_sample().time_ms
    }

    /// Offset of the last sample from loop start.
    pub fn end_ms(&self) -> u32 {
        self.last_sample().time_ms
    }

    /// Samples in time order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

impl std::fmt::Debug for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("id", &self.id)
            .field("pointer_id", &self.pointer_id)
            .field("state", &self.state())
            .field("samples", &self.samples.len())
            .field("start_ms", &self.start_ms())
            .field("end_ms", &self.end_ms())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::PlayError;

    struct Silent;

    impl Instrument for Silent {
        fn play(&mut self, _pitch: f64, _volume_db: f64) -> Result<(), PlayError> {
            Ok(())
        }

        fn stop(&mut self) {}

        fn intervals(&self) -> u32 {
            1
        }
    }

    fn track_at(times: &[u32]) -> Track {
        let mut track = Track::new(TrackId(0), 0, Box::new(Silent), 0.0, 0.0, times[0]);
        for (i, &t) in times.iter().enumerate().skip(1) {
            track.append_sample(i as f64, 0.0, t).unwrap();
        }
        track
    }

    #[test]
    fn end_recording_is_one_way() {
        let mut track = track_at(&[0]);
        assert_eq!(track.state(), TrackState::Recording);
        assert!(track.end_recording());
        assert!(!track.end_recording());
        assert_eq!(track.state(), TrackState::Replaying);
    }

    #[test]
    fn append_rejects_stale_timestamp() {
        let mut track = track_at(&[10, 20]);
        let err = track.append_sample(0.0, 0.0, 15).unwrap_err();
        assert_eq!(err, SequencerError::InvalidSequence { at_ms: 15, tail_ms: 20 });
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn advance_waits_for_first_sample() {
        let mut track = track_at(&[100, 200]);
        let mut points = Vec::new();

        let outcome = track.advance(99, &mut points);
        assert_eq!(outcome, Advance::default());
        assert!(track.cursor_sample().is_none());
        assert!(points.is_empty());

        let outcome = track.advance(100, &mut points);
        assert!(outcome.started && outcome.advanced);
        assert_eq!(track.cursor_sample().unwrap().time_ms, 100);
    }

    #[test]
    fn advance_drains_all_due_samples() {
        let mut track = track_at(&[0, 10, 20, 30, 40]);
        let mut points = Vec::new();

        track.advance(35, &mut points);
        assert_eq!(track.cursor_sample().unwrap().time_ms, 30);
        assert_eq!(points.len(), 4);

        points.clear();
        let outcome = track.advance(35, &mut points);
        assert!(!outcome.advanced, "nothing new is due");
        assert!(points.is_empty());
    }

    #[test]
    fn rewind_restarts_from_first_sample() {
        let mut track = track_at(&[0, 10]);
        let mut points = Vec::new();
        track.advance(50, &mut points);
        assert!(track.cursor_at_end());

        track.rewind();
        assert!(track.cursor_sample().is_none());

        points.clear();
        let outcome = track.advance(0, &mut points);
        assert!(outcome.started);
        assert_eq!(points, vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn take_note_skips_repeated_position() {
        let mut track = Track::new(TrackId(1), 0, Box::new(Silent), 5.0, 5.0, 0);
        track.append_sample(5.0, 5.0, 10).unwrap();
        let mut points = Vec::new();

        track.advance(0, &mut points);
        assert_eq!(track.take_note(), Some(Point::new(5.0, 5.0)));

        track.advance(10, &mut points);
        assert_eq!(track.take_note(), None);
        assert_eq!(points.len(), 1, "identical positions collapse");
    }
}
