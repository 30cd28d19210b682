//! Theremax - draw to play, then hear it loop.
//!
//! Pointer gestures are recorded into tracks and replayed in sync on a
//! fixed-length loop, layered across as many simultaneous recordings as
//! there are pointers.

pub mod clock;
pub mod config;
pub mod dsp;
pub mod engine; // Recording/playback sequencer
pub mod instrument;
pub mod sequencing; // Samples, tracks and scaling
pub mod synth; // Audio-thread voices
pub mod visual;

pub use clock::{Clock, ManualClock, ManualTime, WallClock};
pub use config::TheremaxConfig;
pub use engine::{EngineState, Revealed, Theremax, Tick};
pub use instrument::{Instrument, InstrumentKind, InstrumentRack, PlayError, Timbre};
pub use sequencing::{PointerId, SequencerError, Track, TrackId, TrackState};
pub use visual::{Dimensions, LineCanvas, Point, Visualization};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
