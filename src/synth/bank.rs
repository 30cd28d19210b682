use rtrb::Consumer;

use super::message::{MessageReceiver, VoiceKey, VoiceMessage};
use super::voice::{Voice, VoiceState};
use crate::MAX_BLOCK_SIZE;

/// Output level applied to the voice mix before limiting
const MASTER_GAIN: f32 = 0.5;

/// Audio-thread renderer for every gesture voice
///
/// Each instrument owns one voice key; the bank maps keys onto a fixed pool
/// of voices and mixes them to mono.
pub struct VoiceBank<R: MessageReceiver = Consumer<VoiceMessage>> {
    voices: Vec<Voice>,
    rx: R,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
}

impl<R: MessageReceiver> VoiceBank<R> {
    pub fn new(sample_rate: f32, max_voices: usize, rx: R) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| Voice::new(sample_rate))
            .collect();

        Self {
            voices,
            rx,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    /// Apply pending messages, then render one block into `out`.
    ///
    /// `out` must not exceed [`MAX_BLOCK_SIZE`] frames.
    pub fn render_block(&mut self, out: &mut [f32]) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        while let Some(msg) = self.rx.pop() {
            self.apply(msg);
        }

        out.fill(0.0);
        let frames = out.len().min(self.temp_buffer.len());
        for voice in &mut self.voices {
            if voice.is_active() {
                let temp = &mut self.temp_buffer[..frames];
                temp.fill(0.0);
                voice.render(temp);

                for (o, v) in out.iter_mut().zip(temp.iter()) {
                    *o += v;
                }
            }
        }

        // Soft limit: several loud tracks may overlap
        for o in out.iter_mut() {
            *o = (*o * MASTER_GAIN).tanh();
        }

        self.frame_counter += out.len() as u64;
    }

    fn apply(&mut self, msg: VoiceMessage) {
        match msg {
            VoiceMessage::NoteOn {
                key,
                frequency,
                gain,
                patch,
            } => {
                let age = self.frame_counter;
                let voice = self.allocate_voice(key);
                voice.start(key, frequency, gain, patch, age);
            }
            VoiceMessage::Release { key } => {
                if let Some(voice) = self.find_voice(key) {
                    voice.release();
                }
            }
            VoiceMessage::AllNotesOff => {
                for voice in &mut self.voices {
                    voice.release();
                }
            }
        }
    }

    /// Voice for `key`: its own, else a free one, else the oldest
    /// releasing one, else the oldest overall.
    fn allocate_voice(&mut self, key: VoiceKey) -> &mut Voice {
        let idx = self
            .voices
            .iter()
            .position(|v| v.is_active() && v.key() == key)
            .or_else(|| self.voices.iter().position(|v| v.is_free()))
            .or_else(|| {
                self.voices
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.state() == VoiceState::Releasing)
                    .min_by_key(|(_, v)| v.age())
                    .map(|(idx, _)| idx)
            })
            .or_else(|| {
                self.voices
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| v.age())
                    .map(|(idx, _)| idx)
            })
            .unwrap_or(0);

        &mut self.voices[idx]
    }

    fn find_voice(&mut self, key: VoiceKey) -> Option<&mut Voice> {
        self.voices
            .iter_mut()
            .find(|v| v.key() == key && v.is_active())
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn voice(&self, key: VoiceKey) -> Option<&Voice> {
        self.voices.iter().find(|v| v.key() == key && v.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::message::voice_channel;
    use crate::synth::patch::Patch;

    fn note_on(key: VoiceKey, frequency: f32) -> VoiceMessage {
        VoiceMessage::NoteOn {
            key,
            frequency,
            gain: 1.0,
            patch: Patch::default(),
        }
    }

    #[test]
    fn same_key_reuses_its_voice() {
        let (mut tx, rx) = voice_channel(16);
        let mut bank = VoiceBank::new(8_000.0, 4, rx);
        let mut out = vec![0.0; 64];

        tx.push(note_on(1, 220.0)).unwrap();
        tx.push(note_on(1, 330.0)).unwrap();
        bank.render_block(&mut out);

        assert_eq!(bank.active_voices(), 1);
        assert_eq!(bank.voice(1).unwrap().frequency(), 330.0);
    }

    #[test]
    fn steals_oldest_when_pool_is_full() {
        let (mut tx, rx) = voice_channel(16);
        let mut bank = VoiceBank::new(8_000.0, 2, rx);
        let mut out = vec![0.0; 64];

        tx.push(note_on(1, 220.0)).unwrap();
        bank.render_block(&mut out);
        tx.push(note_on(2, 330.0)).unwrap();
        bank.render_block(&mut out);
        tx.push(note_on(3, 440.0)).unwrap();
        bank.render_block(&mut out);

        assert_eq!(bank.active_voices(), 2);
        assert!(bank.voice(1).is_none(), "oldest voice was stolen");
        assert!(bank.voice(3).is_some());
    }

    #[test]
    fn output_is_limited() {
        let (mut tx, rx) = voice_channel(16);
        let mut bank = VoiceBank::new(8_000.0, 8, rx);
        for key in 0..8 {
            tx.push(note_on(key, 110.0)).unwrap();
        }

        let mut out = vec![0.0; 512];
        bank.render_block(&mut out);
        assert!(out.iter().all(|s| s.abs() <= 1.0));
        assert!(out.iter().any(|s| s.abs() > 0.0));
    }
}
