use super::{Instrument, PlayError, Timbre, VoiceSender};
use crate::dsp::{db_to_gain, midi_note_to_freq};
use crate::sequencing::lerp;
use crate::synth::{VoiceKey, VoiceMessage};

/// MIDI number of the lowest key (C5)
pub const LOWEST_NOTE: u8 = 72;

/// Two chromatic octaves, C5 to B6
pub const NOTE_NAMES: [&str; 24] = [
    "C5", "C#5", "D5", "D#5", "E5", "F5", "F#5", "G5", "G#5", "A5", "A#5", "B5",
    "C6", "C#6", "D6", "D#6", "E6", "F6", "F#6", "G6", "G#6", "A6", "A#6", "B6",
];

/// Chromatic keyboard instrument
///
/// The pitch axis is cut into one band per key; positions past either edge
/// stick to the outermost key.
pub struct KeyedSynth {
    sender: VoiceSender,
    key: VoiceKey,
    timbre: Timbre,
}

impl KeyedSynth {
    pub fn new(sender: VoiceSender, key: VoiceKey, timbre: Timbre) -> Self {
        Self { sender, key, timbre }
    }

    /// Index into [`NOTE_NAMES`] for a normalized pitch.
    pub fn note_index(pitch: f64) -> usize {
        let len = NOTE_NAMES.len();
        let index = lerp(pitch, 0.0, 1.0, 0.0, len as f64).floor();
        if index.is_nan() || index < 0.0 {
            0
        } else {
            (index as usize).min(len - 1)
        }
    }

    pub fn note_name(pitch: f64) -> &'static str {
        NOTE_NAMES[Self::note_index(pitch)]
    }

    pub fn timbre(&self) -> Timbre {
        self.timbre
    }
}

impl Instrument for KeyedSynth {
    fn play(&mut self, pitch: f64, volume_db: f64) -> Result<(), PlayError> {
        let note = LOWEST_NOTE + Self::note_index(pitch) as u8;
        self.sender.send(VoiceMessage::NoteOn {
            key: self.key,
            frequency: midi_note_to_freq(note),
            gain: db_to_gain(volume_db),
            patch: self.timbre.patch(),
        })
    }

    fn stop(&mut self) {
        self.sender.release(self.key);
    }

    fn intervals(&self) -> u32 {
        NOTE_NAMES.len() as u32
    }
}
