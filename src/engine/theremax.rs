//! Theremax - the gesture loop sequencer
//!
//! Records pointer gestures into tracks and replays every track against one
//! shared loop clock. The host drives it from two sides:
//!
//! - input events call [`begin_track`](Theremax::begin_track),
//!   [`continue_track`](Theremax::continue_track) and
//!   [`end_track`](Theremax::end_track);
//! - the frame loop calls [`tick`](Theremax::tick) once per frame.
//!
//! Everything is synchronous and single-threaded. Instruments and the
//! visualization are called from inside `tick()` and must not call back
//! into the sequencer.

use log::{debug, warn};

use super::tick::{Revealed, Tick};
use crate::clock::{Clock, WallClock};
use crate::config::TheremaxConfig;
use crate::instrument::Instrument;
use crate::sequencing::{
    scale_point, PointerId, SequencerError, Track, TrackId, VolumeRange,
};
use crate::visual::{Point, Visualization};

/// Whether any track exists in the current loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Empty,
    Active,
}

/// Gesture loop sequencer
pub struct Theremax<V: Visualization, C: Clock = WallClock> {
    /// Loop length in milliseconds
    loop_length_ms: u32,
    /// Volume span of the vertical axis
    volume: VolumeRange,
    /// Shared loop clock, anchored to the first gesture
    clock: C,
    visualization: V,
    /// Tracks in creation order
    tracks: Vec<Track>,
    next_track_id: u32,
    /// Reused per-track buffer for revealed points
    scratch: Vec<Point>,
}

impl<V: Visualization> Theremax<V, WallClock> {
    /// Create a sequencer running on wall-clock time
    pub fn new(config: TheremaxConfig, visualization: V) -> Self {
        Self::with_clock(config, visualization, WallClock::new())
    }
}

impl<V: Visualization, C: Clock> Theremax<V, C> {
    /// Create a sequencer running on a custom clock
    pub fn with_clock(config: TheremaxConfig, visualization: V, clock: C) -> Self {
        Self {
            loop_length_ms: config.loop_length_ms(),
            volume: config.volume,
            clock,
            visualization,
            tracks: Vec::new(),
            next_track_id: 0,
            scratch: Vec::with_capacity(64),
        }
    }

    // -------------------------------
    // MARK: Recording
    // -------------------------------

    /// Start recording a gesture for `pointer_id`.
    ///
    /// The first track of a loop resets the clock, so the loop is measured
    /// from the first gesture. Later tracks join the running loop at the
    /// current time.
    pub fn begin_track(
        &mut self,
        x: f64,
        y: f64,
        pointer_id: PointerId,
        instrument: Box<dyn Instrument>,
    ) -> TrackId {
        if self.tracks.is_empty() {
            self.clock.reset();
        } else {
            self.wrap_if_overdue();
        }

        // A lost pointer-up must not leave two recorders on one pointer
        if let Some(stale) = self.recording_track_mut(pointer_id) {
            stale.end_recording();
            debug!("pointer {} restarted, sealed track {}", pointer_id, stale.id());
        }

        let id = TrackId(self.next_track_id);
        self.next_track_id = self.next_track_id.wrapping_add(1);

        let at_ms = self.clock.elapsed_ms();
        self.tracks
            .push(Track::new(id, pointer_id, instrument, x, y, at_ms));

        debug!("track {} started by pointer {} at {} ms", id, pointer_id, at_ms);
        id
    }

    /// Append the pointer's current position to its recording track.
    pub fn continue_track(
        &mut self,
        x: f64,
        y: f64,
        pointer_id: PointerId,
    ) -> Result<(), SequencerError> {
        self.wrap_if_overdue();
        let at_ms = self.clock.elapsed_ms();
        let track = self
            .recording_track_mut(pointer_id)
            .ok_or(SequencerError::NoActiveTrack { pointer_id })?;
        track.append_sample(x, y, at_ms)
    }

    /// Stop recording the pointer's track; it keeps replaying every loop.
    pub fn end_track(&mut self, pointer_id: PointerId) -> Result<TrackId, SequencerError> {
        let track = self
            .recording_track_mut(pointer_id)
            .ok_or(SequencerError::NoActiveTrack { pointer_id })?;
        track.end_recording();

        debug!(
            "track {} ended with {} samples ({}..{} ms)",
            track.id(),
            track.len(),
            track.start_ms(),
            track.end_ms()
        );
        Ok(track.id())
    }

    fn recording_track_mut(&mut self, pointer_id: PointerId) -> Option<&mut Track> {
        self.tracks
            .iter_mut()
            .rev()
            .find(|t| t.is_recording() && t.pointer_id() == pointer_id)
    }

    // -------------------------------
    // MARK: Playback
    // -------------------------------

    /// Advance every track to the current loop time.
    ///
    /// Fires the instrument of each track whose cursor moved onto a new
    /// position, stops the instrument of tracks that finished, and forwards
    /// newly due points to the visualization. When the loop length has been
    /// exceeded the tick only wraps the loop.
    pub fn tick(&mut self) -> Tick {
        let elapsed_ms = self.clock.elapsed_ms();
        if self.tracks.is_empty() {
            return Tick::at(elapsed_ms);
        }

        if elapsed_ms > self.loop_length_ms {
            self.wrap();
            return Tick::wrapped();
        }

        let dimensions = self.visualization.dimensions();
        let mut tick = Tick::at(elapsed_ms);

        for track in &mut self.tracks {
            self.scratch.clear();
            let advance = track.advance(elapsed_ms, &mut self.scratch);

            if track.is_finished(elapsed_ms) {
                if track.silence() {
                    debug!("track {} finished at {} ms", track.id(), elapsed_ms);
                }
            } else if advance.advanced {
                if let Some(point) = track.take_note() {
                    let note = scale_point(point, dimensions, self.volume);
                    if let Err(err) = track.instrument_mut().play(note.pitch, note.volume_db) {
                        // One missed note must not stall the loop
                        warn!("track {} dropped a note: {}", track.id(), err);
                    }
                }
            }

            if self.scratch.is_empty() {
                continue;
            }

            let id = track.id();
            match (advance.started, self.scratch.split_first()) {
                (true, Some((first, rest))) => {
                    self.visualization.create_line(*first, id);
                    if !rest.is_empty() {
                        self.visualization.add_points(rest, id);
                    }
                }
                _ => self.visualization.add_points(&self.scratch, id),
            }

            tick.revealed.push(Revealed {
                track: id,
                started: advance.started,
                points: self.scratch.clone(),
            });
        }

        tick
    }

    /// Wrap a loop whose end passed since the last tick, so new samples
    /// land in the next iteration instead of past the loop end.
    fn wrap_if_overdue(&mut self) {
        if !self.tracks.is_empty() && self.clock.elapsed_ms() > self.loop_length_ms {
            self.wrap();
        }
    }

    /// Restart the loop: every track replays from its first sample.
    fn wrap(&mut self) {
        self.clock.reset();

        for track in &mut self.tracks {
            track.instrument_mut().stop();
            // Later samples of an open recording would run backwards in time
            if track.end_recording() {
                debug!("track {} sealed at loop wrap", track.id());
            }
            track.rewind();
        }

        self.visualization.clear_lines();
        debug!("loop wrapped with {} tracks", self.tracks.len());
    }

    /// Stop everything and drop all tracks.
    pub fn reset(&mut self) {
        for track in &mut self.tracks {
            track.instrument_mut().stop();
        }
        self.tracks.clear();
        self.clock.reset();
        self.visualization.clear_lines();
        debug!("sequencer reset");
    }

    // -------------------------------
    // MARK: Accessors
    // -------------------------------

    /// Note resolution of the instrument being recorded.
    ///
    /// With several simultaneous recordings this reports the newest one.
    pub fn intervals(&self) -> Option<u32> {
        self.tracks
            .iter()
            .rev()
            .find(|t| t.is_recording())
            .map(|t| t.instrument().intervals())
    }

    pub fn state(&self) -> EngineState {
        if self.tracks.is_empty() {
            EngineState::Empty
        } else {
            EngineState::Active
        }
    }

    /// Fraction of the loop elapsed, `0.0` when empty.
    pub fn loop_progress(&self) -> f64 {
        if self.tracks.is_empty() || self.loop_length_ms == 0 {
            return 0.0;
        }
        (self.clock.elapsed_ms() as f64 / self.loop_length_ms as f64).min(1.0)
    }

    pub fn loop_length_ms(&self) -> u32 {
        self.loop_length_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.clock.elapsed_ms()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn visualization(&self) -> &V {
        &self.visualization
    }

    pub fn visualization_mut(&mut self) -> &mut V {
        &mut self.visualization
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
