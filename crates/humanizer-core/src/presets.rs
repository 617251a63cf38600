//! Built-in humanize presets

use serde::{Deserialize, Serialize};

use crate::error::{HumanizerError, Result};
use crate::params::HumanizeParams;

/// A named set of humanize parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub params: HumanizeParams,
}

impl Preset {
    fn new(name: &str, velocity: f64, timing: f64, randomize: f64) -> Self {
        Self {
            name: name.to_string(),
            params: HumanizeParams { velocity, timing, randomize },
        }
    }
}

/// Factory presets, from gentlest to wildest
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new("Subtle Groove", 15.0, 10.0, 30.0),
        Preset::new("Human Feel", 25.0, 20.0, 60.0),
        Preset::new("Chaotic", 70.0, 60.0, 90.0),
    ]
}

/// Look up a factory preset by name, ignoring case
pub fn find_preset(name: &str) -> Result<Preset> {
    builtin_presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| HumanizerError::UnknownPreset(name.to_string()))
}
