use std::f32::consts::TAU;

use super::message::VoiceKey;
use super::patch::{Modulation, Patch};
use crate::dsp::{Envelope, EnvelopeState, Phasor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Sounding, envelope in attack/decay/sustain
    Releasing, // Released, envelope in release phase
}

/// A single monophonic gesture voice: oscillator x envelope x gain
pub struct Voice {
    key: VoiceKey,
    state: VoiceState,
    age: u64,
    sample_rate: f32,

    patch: Patch,
    frequency: f32,
    gain: f32,
    /// Samples left before the note releases on its own
    hold_remaining: u32,

    carrier: Phasor,
    modulator: Phasor,
    envelope: Envelope,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        let patch = Patch::default();
        Self {
            key: 0,
            state: VoiceState::Free,
            age: 0,
            sample_rate,
            patch,
            frequency: 440.0,
            gain: 0.0,
            hold_remaining: 0,
            carrier: Phasor::new(),
            modulator: Phasor::new(),
            envelope: Envelope::adsr(patch.envelope),
        }
    }

    /// Start a note, or retune/retrigger the one already sounding.
    pub fn start(&mut self, key: VoiceKey, frequency: f32, gain: f32, patch: Patch, age: u64) {
        if self.state == VoiceState::Free || self.key != key {
            self.carrier.reset();
            self.modulator.reset();
            self.envelope.reset();
        }

        self.key = key;
        self.state = VoiceState::Active;
        self.age = age;
        self.frequency = frequency;
        self.gain = gain;
        self.patch = patch;
        self.hold_remaining = (patch.hold * self.sample_rate) as u32;

        self.envelope.set_shape(patch.envelope);
        self.envelope.note_on();
    }

    pub fn release(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.envelope.note_off(self.sample_rate);
        }
    }

    /// Add this voice's output into `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            if self.state == VoiceState::Active {
                if self.hold_remaining == 0 {
                    self.release();
                } else {
                    self.hold_remaining -= 1;
                }
            }

            let level = self.envelope.next_sample(self.sample_rate);
            *sample += self.oscillate() * level * self.gain;
        }

        // Percussive shapes end without a release
        if self.is_active() && self.envelope.state() == EnvelopeState::Idle {
            self.free();
        }
    }

    fn oscillate(&mut self) -> f32 {
        let waveform = self.patch.waveform;
        match self.patch.modulation {
            Modulation::None => {
                let phase = self.carrier.tick(self.frequency, self.sample_rate);
                waveform.at(phase)
            }
            Modulation::Am { ratio, depth } => {
                let phase = self.carrier.tick(self.frequency, self.sample_rate);
                let mod_phase = self.modulator.tick(self.frequency * ratio, self.sample_rate);
                let amp = 1.0 - depth * 0.5 * (1.0 - (mod_phase * TAU).sin());
                waveform.at(phase) * amp
            }
            Modulation::Fm { ratio, index } => {
                let phase = self.carrier.tick(self.frequency, self.sample_rate);
                let mod_phase = self.modulator.tick(self.frequency * ratio, self.sample_rate);
                let offset = index * (mod_phase * TAU).sin() / TAU;
                waveform.at(Phasor::offset(phase, offset))
            }
            Modulation::Detune { cents } => {
                let detuned = self.frequency * 2f32.powf(cents / 1200.0);
                let a = self.carrier.tick(self.frequency, self.sample_rate);
                let b = self.modulator.tick(detuned, self.sample_rate);
                0.5 * (waveform.at(a) + waveform.at(b))
            }
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.envelope.reset();
    }

    pub fn key(&self) -> VoiceKey {
        self.key
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{Adsr, Waveform};

    const SAMPLE_RATE: f32 = 8_000.0;

    #[test]
    fn started_voice_produces_sound() {
        let mut voice = Voice::new(SAMPLE_RATE);
        voice.start(1, 440.0, 0.5, Patch::default(), 0);

        let mut out = vec![0.0; 256];
        voice.render(&mut out);

        assert!(out.iter().any(|s| s.abs() > 0.0));
        assert!(out.iter().all(|s| s.abs() <= 0.5));
    }

    #[test]
    fn hold_expiry_releases_and_frees() {
        let patch = Patch::new(Waveform::Sine, Modulation::None, Adsr::new(0.001, 0.01, 0.5, 0.01))
            .with_hold(0.01);
        let mut voice = Voice::new(SAMPLE_RATE);
        voice.start(1, 220.0, 1.0, patch, 0);

        let mut out = vec![0.0; 512];
        voice.render(&mut out);

        assert!(voice.is_free(), "voice should free after hold + release");
    }

    #[test]
    fn release_moves_to_releasing() {
        let mut voice = Voice::new(SAMPLE_RATE);
        voice.start(7, 330.0, 1.0, Patch::default(), 0);
        voice.release();
        assert_eq!(voice.state(), VoiceState::Releasing);
        assert_eq!(voice.key(), 7);
    }
}
