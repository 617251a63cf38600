//! humanizer-core: Note humanization engine
//!
//! Holds a fixed 16-step base pattern and derives velocity/timing-perturbed
//! variants of it from three 0-100 control amounts.

mod config;
mod engine;
mod error;
pub mod humanize;
pub mod midi_fx;
pub mod params;
pub mod pattern;
mod presets;
pub mod random;

pub use config::HumanizerConfig;
pub use engine::{EngineState, Humanizer};
pub use error::{HumanizerError, Result};
pub use humanize::recompute;
pub use midi_fx::{MidiEvent, MidiFx, MidiFxParam, RandomizerFx};
pub use params::{HumanizeParams, ParamPolicy};
pub use pattern::{NoteEvent, NoteKey, Pattern, PATTERN_LEN, generate_base_pattern};
pub use presets::{Preset, builtin_presets, find_preset};
pub use random::{RandomSource, SequenceSource};
