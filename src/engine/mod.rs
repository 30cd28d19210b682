// Purpose: the recording/playback sequencer and its per-tick report

pub mod theremax;
pub mod tick;

pub use theremax::{EngineState, Theremax};
pub use tick::{Revealed, Tick};
