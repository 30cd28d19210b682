// Purpose: audio-thread side of the instruments
// Instruments push voice messages; the bank turns them into samples

pub mod bank;
pub mod message;
pub mod patch;
pub mod voice;

pub use bank::VoiceBank;
pub use message::{voice_channel, MessageReceiver, VoiceKey, VoiceMessage};
pub use patch::{Modulation, Patch};
pub use voice::{Voice, VoiceState};
