//! Low-level DSP primitives used by the gesture voices.
//!
//! These components are allocation-free and realtime-safe, so they can live
//! directly inside voice structs on the audio thread.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Phase accumulator and waveforms.
pub mod oscillator;

pub use envelope::{Adsr, Envelope, EnvelopeState};
pub use oscillator::{Phasor, Waveform};

/// Convert a level in decibels to linear gain.
#[inline]
pub fn db_to_gain(db: f64) -> f32 {
    10f64.powf(db / 20.0) as f32
}

/// Convert a MIDI note number to frequency in Hz (A4 = 69 = 440 Hz).
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decibels_to_gain() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(-20.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn a4_is_440() {
        assert!((midi_note_to_freq(69) - 440.0).abs() < 1e-3);
        assert!((midi_note_to_freq(72) - 523.25).abs() < 0.01);
    }
}
