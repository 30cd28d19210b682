use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use rtrb::Producer;

use super::{Instrument, InstrumentKind, KeyedSynth, PlayError, Theremin};
use crate::synth::{VoiceKey, VoiceMessage};

/// Control-thread end of the voice queue, shared by every instrument
///
/// `rtrb` has a single producer, so instruments share it through an
/// `Rc<RefCell<_>>`; the sequencer and its instruments live on one thread.
#[derive(Clone)]
pub struct VoiceSender {
    tx: Rc<RefCell<Producer<VoiceMessage>>>,
}

impl VoiceSender {
    pub fn new(tx: Producer<VoiceMessage>) -> Self {
        Self {
            tx: Rc::new(RefCell::new(tx)),
        }
    }

    pub fn send(&self, msg: VoiceMessage) -> Result<(), PlayError> {
        let mut tx = self.tx.borrow_mut();
        if tx.is_abandoned() {
            return Err(PlayError::Disconnected);
        }
        tx.push(msg).map_err(|_| PlayError::QueueFull)
    }

    /// Send a release, logging instead of failing.
    pub(crate) fn release(&self, key: VoiceKey) {
        if let Err(err) = self.send(VoiceMessage::Release { key }) {
            debug!("release for voice {} dropped: {}", key, err);
        }
    }
}

/// Factory that hands every new instrument its own voice key
pub struct InstrumentRack {
    sender: VoiceSender,
    next_key: VoiceKey,
}

impl InstrumentRack {
    pub fn new(tx: Producer<VoiceMessage>) -> Self {
        Self {
            sender: VoiceSender::new(tx),
            next_key: 0,
        }
    }

    /// Build an instrument of `kind` on a fresh voice.
    pub fn build(&mut self, kind: InstrumentKind) -> Box<dyn Instrument> {
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1);

        match kind {
            InstrumentKind::Theremin => Box::new(Theremin::new(self.sender.clone(), key)),
            InstrumentKind::Synth(timbre) => {
                Box::new(KeyedSynth::new(self.sender.clone(), key, timbre))
            }
        }
    }

    /// Release every voice at once.
    pub fn all_notes_off(&self) {
        if let Err(err) = self.sender.send(VoiceMessage::AllNotesOff) {
            debug!("all-notes-off dropped: {}", err);
        }
    }
}
