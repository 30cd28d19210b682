#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{Adsr, Waveform};

/// Secondary oscillator applied to the carrier
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modulation {
    None,
    /// Amplitude modulation by a sine at `ratio` x carrier frequency
    Am { ratio: f32, depth: f32 },
    /// Phase modulation by a sine at `ratio` x carrier frequency
    Fm { ratio: f32, index: f32 },
    /// Second carrier detuned by `cents`, mixed equally
    Detune { cents: f32 },
}

/// Sound design of one voice
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    pub waveform: Waveform,
    pub modulation: Modulation,
    pub envelope: Adsr,
    /// Seconds a note sounds before releasing on its own
    pub hold: f32,
}

impl Patch {
    pub const fn new(waveform: Waveform, modulation: Modulation, envelope: Adsr) -> Self {
        Self {
            waveform,
            modulation,
            envelope,
            hold: 2.0,
        }
    }

    pub const fn with_hold(mut self, hold: f32) -> Self {
        self.hold = hold;
        self
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new(Waveform::Sine, Modulation::None, Adsr::new(0.01, 0.1, 0.8, 0.3))
    }
}
