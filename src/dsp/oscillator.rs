#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/*
Oscillator
==========

A phase accumulator plus a waveform lookup. The phase runs from 0.0 to 1.0
and wraps; each sample it advances by frequency / sample_rate.

  Sine      pure tone, no overtones
  Triangle  soft, weak odd harmonics (falls off 1/n²)
  Saw       bright, every harmonic (falls off 1/n)
  Square    hollow, odd harmonics only (falls off 1/n)

No band-limiting: gesture instruments stay in a few kHz, where the aliasing
of the naive saw and square is tolerable.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Saw,
    Square,
}

impl Waveform {
    /// Waveform value at `phase` in `[0, 1)`, output in `[-1, 1]`.
    #[inline]
    pub fn at(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Saw => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Phase accumulator
#[derive(Debug, Clone, Copy, Default)]
pub struct Phasor {
    phase: f32,
}

impl Phasor {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase, then advance by one sample at `frequency`.
    #[inline]
    pub fn tick(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let phase = self.phase;
        self.phase = (self.phase + frequency / sample_rate).rem_euclid(1.0);
        phase
    }

    /// Shift the phase by `offset` cycles (phase modulation).
    #[inline]
    pub fn offset(phase: f32, offset: f32) -> f32 {
        (phase + offset).rem_euclid(1.0)
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
