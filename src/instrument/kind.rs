#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::str::FromStr;

use crate::dsp::{Adsr, Waveform};
use crate::synth::{Modulation, Patch};

/// Sound of a [`KeyedSynth`](super::KeyedSynth)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timbre {
    Basic,
    Am,
    Fm,
    Duo,
    Membrane,
    Metal,
    Mono,
    Pluck,
}

impl Timbre {
    pub const ALL: [Timbre; 8] = [
        Timbre::Basic,
        Timbre::Am,
        Timbre::Fm,
        Timbre::Duo,
        Timbre::Membrane,
        Timbre::Metal,
        Timbre::Mono,
        Timbre::Pluck,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Timbre::Basic => "synth",
            Timbre::Am => "am",
            Timbre::Fm => "fm",
            Timbre::Duo => "duo",
            Timbre::Membrane => "membrane",
            Timbre::Metal => "metal",
            Timbre::Mono => "mono",
            Timbre::Pluck => "pluck",
        }
    }

    pub fn patch(self) -> Patch {
        match self {
            Timbre::Basic => Patch::new(
                Waveform::Triangle,
                Modulation::None,
                Adsr::new(0.005, 0.1, 0.3, 1.0),
            ),
            Timbre::Am => Patch::new(
                Waveform::Sine,
                Modulation::Am { ratio: 3.0, depth: 1.0 },
                Adsr::new(0.01, 0.01, 1.0, 0.5),
            ),
            Timbre::Fm => Patch::new(
                Waveform::Sine,
                Modulation::Fm { ratio: 3.0, index: 10.0 },
                Adsr::new(0.01, 0.01, 1.0, 0.5),
            ),
            Timbre::Duo => Patch::new(
                Waveform::Saw,
                Modulation::Detune { cents: 12.0 },
                Adsr::new(0.01, 0.25, 0.4, 1.2),
            ),
            Timbre::Membrane => Patch::new(
                Waveform::Sine,
                Modulation::None,
                Adsr::new(0.001, 0.4, 0.0, 1.4),
            )
            .with_hold(0.4),
            Timbre::Metal => Patch::new(
                Waveform::Square,
                Modulation::Fm { ratio: 1.4, index: 32.0 },
                Adsr::new(0.001, 1.4, 0.0, 0.2),
            )
            .with_hold(1.4),
            Timbre::Mono => Patch::new(
                Waveform::Square,
                Modulation::None,
                Adsr::new(0.005, 0.1, 0.9, 1.0),
            ),
            Timbre::Pluck => Patch::new(
                Waveform::Saw,
                Modulation::None,
                Adsr::new(0.001, 0.3, 0.0, 0.3),
            )
            .with_hold(0.3),
        }
    }
}

/// Concrete instrument a new track is built with
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InstrumentKind {
    #[default]
    Theremin,
    Synth(Timbre),
}

impl InstrumentKind {
    /// Every selectable instrument, in picker order.
    pub const ALL: [InstrumentKind; 9] = [
        InstrumentKind::Theremin,
        InstrumentKind::Synth(Timbre::Basic),
        InstrumentKind::Synth(Timbre::Am),
        InstrumentKind::Synth(Timbre::Fm),
        InstrumentKind::Synth(Timbre::Duo),
        InstrumentKind::Synth(Timbre::Membrane),
        InstrumentKind::Synth(Timbre::Metal),
        InstrumentKind::Synth(Timbre::Mono),
        InstrumentKind::Synth(Timbre::Pluck),
    ];

    pub fn name(self) -> &'static str {
        match self {
            InstrumentKind::Theremin => "theremin",
            InstrumentKind::Synth(timbre) => timbre.name(),
        }
    }
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InstrumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        InstrumentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = InstrumentKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown instrument '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
