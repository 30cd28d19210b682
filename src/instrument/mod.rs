//! Instruments - what a track sounds like
//!
//! The sequencer only sees the [`Instrument`] capability. Concrete
//! instruments translate `play`/`stop` into [`VoiceMessage`]s for the
//! audio thread; which one a track gets is chosen with [`InstrumentKind`].

pub mod keyed;
pub mod kind;
pub mod rack;
pub mod theremin;

pub use keyed::KeyedSynth;
pub use kind::{InstrumentKind, Timbre};
pub use rack::{InstrumentRack, VoiceSender};
pub use theremin::Theremin;

use crate::synth::VoiceMessage;

/// Sound source driven by a track
pub trait Instrument {
    /// Sound a note. `pitch` is the horizontal position normalized to
    /// roughly `[0, 1]`, `volume_db` the loudness in decibels.
    fn play(&mut self, pitch: f64, volume_db: f64) -> Result<(), PlayError>;

    /// Silence whatever is sounding.
    fn stop(&mut self);

    /// Number of distinct notes the pitch axis resolves to.
    fn intervals(&self) -> u32;
}

/// Why an instrument could not sound a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    /// The audio thread has not drained the voice queue yet
    QueueFull,
    /// The audio side of the voice queue was dropped
    Disconnected,
}

impl std::fmt::Display for PlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayError::QueueFull => write!(f, "Voice queue is full"),
            PlayError::Disconnected => write!(f, "Voice queue has no audio consumer"),
        }
    }
}

impl std::error::Error for PlayError {}

/// Allow boxed instruments to be used as instruments (for dynamic dispatch)
impl Instrument for Box<dyn Instrument> {
    fn play(&mut self, pitch: f64, volume_db: f64) -> Result<(), PlayError> {
        (**self).play(pitch, volume_db)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn intervals(&self) -> u32 {
        (**self).intervals()
    }
}
