pub mod error;
pub mod sample;
pub mod scale;
pub mod track;

pub use error::SequencerError;
pub use sample::{Sample, SampleChain, SampleId};
pub use scale::{lerp, scale_point, Note, VolumeRange};
pub use track::{Advance, PointerId, Track, TrackId, TrackState};
