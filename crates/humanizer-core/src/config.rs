//! Humanizer configuration loaded from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{HumanizeParams, ParamPolicy};

/// ```toml
/// policy = "reject"
/// seed = 42
///
/// [defaults]
/// velocity = 20.0
/// timing = 15.0
/// randomize = 50.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanizerConfig {
    /// Parameters used at startup and by `reset`
    #[serde(default)]
    pub defaults: HumanizeParams,
    #[serde(default)]
    pub policy: ParamPolicy,
    /// Fixed seed for reproducible sessions; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl HumanizerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Random source for an engine built from this config
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
