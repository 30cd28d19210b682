use rtrb::{Consumer, Producer, RingBuffer};

use super::patch::Patch;

/// Identifies which voice a message is for (one key per instrument)
pub type VoiceKey = u32;

/// Control messages from instruments to the audio thread
#[derive(Debug, Copy, Clone)]
pub enum VoiceMessage {
    /// Start or retune the voice owned by `key`
    NoteOn {
        key: VoiceKey,
        frequency: f32,
        gain: f32,
        patch: Patch,
    },
    /// Release the voice owned by `key`
    Release { key: VoiceKey },
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}

/// Lock-free queue between the control thread and the voice bank.
pub fn voice_channel(capacity: usize) -> (Producer<VoiceMessage>, Consumer<VoiceMessage>) {
    RingBuffer::new(capacity)
}
