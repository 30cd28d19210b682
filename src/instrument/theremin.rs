use super::{Instrument, PlayError, VoiceSender};
use crate::dsp::{db_to_gain, Adsr, Waveform};
use crate::sequencing::lerp;
use crate::synth::{Modulation, Patch, VoiceKey, VoiceMessage};

/// Lowest pitch, at the right edge
pub const MIN_FREQUENCY: f64 = 20.0;
/// Highest pitch, at the left edge
pub const MAX_FREQUENCY: f64 = 2000.0;

const PATCH: Patch = Patch::new(
    Waveform::Sine,
    Modulation::None,
    Adsr::new(0.01, 0.1, 0.8, 0.3),
);

/// Continuous-pitch sine voice
///
/// Pitch is not quantized: every horizontal position is its own frequency,
/// falling from [`MAX_FREQUENCY`] on the left to [`MIN_FREQUENCY`] on the right.
pub struct Theremin {
    sender: VoiceSender,
    key: VoiceKey,
}

impl Theremin {
    pub fn new(sender: VoiceSender, key: VoiceKey) -> Self {
        Self { sender, key }
    }

    pub fn frequency(pitch: f64) -> f64 {
        lerp(pitch, 0.0, 1.0, MAX_FREQUENCY, MIN_FREQUENCY)
    }
}

impl Instrument for Theremin {
    fn play(&mut self, pitch: f64, volume_db: f64) -> Result<(), PlayError> {
        self.sender.send(VoiceMessage::NoteOn {
            key: self.key,
            frequency: Self::frequency(pitch).max(1.0) as f32,
            gain: db_to_gain(volume_db),
            patch: PATCH,
        })
    }

    fn stop(&mut self) {
        self.sender.release(self.key);
    }

    fn intervals(&self) -> u32 {
        (MAX_FREQUENCY - MIN_FREQUENCY) as u32
    }
}
