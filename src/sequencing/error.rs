use super::track::PointerId;

/// Errors raised by recording operations
///
/// Both are contract violations by the caller, reported rather than ignored
/// so broken input dispatch shows up early. Neither poisons the sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerError {
    /// `continue_track` / `end_track` for a pointer that is not recording
    NoActiveTrack { pointer_id: PointerId },
    /// Sample appended with a timestamp earlier than the track's tail
    InvalidSequence { at_ms: u32, tail_ms: u32 },
}

impl std::fmt::Display for SequencerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequencerError::NoActiveTrack { pointer_id } => {
                write!(f, "No track is recording for pointer {}", pointer_id)
            }
            SequencerError::InvalidSequence { at_ms, tail_ms } => {
                write!(
                    f,
                    "Sample at {} ms is earlier than the track tail at {} ms",
                    at_ms, tail_ms
                )
            }
        }
    }
}

impl std::error::Error for SequencerError {}
