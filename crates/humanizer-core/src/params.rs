//! Humanize control parameters

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HumanizerError, Result};

pub const PARAM_MIN: f64 = 0.0;
pub const PARAM_MAX: f64 = 100.0;

pub const DEFAULT_VELOCITY: f64 = 20.0;
pub const DEFAULT_TIMING: f64 = 15.0;
pub const DEFAULT_RANDOMIZE: f64 = 50.0;

/// What to do with a parameter outside 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamPolicy {
    /// Clamp into range and log a warning
    #[default]
    Clamp,
    /// Fail with `InvalidParameter`
    Reject,
}

/// The three humanize amounts, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanizeParams {
    /// Velocity perturbation width
    pub velocity: f64,
    /// Timing perturbation width
    pub timing: f64,
    /// Chance (percent) that any one note is randomized
    pub randomize: f64,
}

impl Default for HumanizeParams {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            timing: DEFAULT_TIMING,
            randomize: DEFAULT_RANDOMIZE,
        }
    }
}

impl HumanizeParams {
    /// Build params, rejecting anything outside 0-100
    pub fn new(velocity: f64, timing: f64, randomize: f64) -> Result<Self> {
        Self::with_policy(velocity, timing, randomize, ParamPolicy::Reject)
    }

    pub fn with_policy(velocity: f64, timing: f64, randomize: f64, policy: ParamPolicy) -> Result<Self> {
        Ok(Self {
            velocity: check("velocity", velocity, policy)?,
            timing: check("timing", timing, policy)?,
            randomize: check("randomize", randomize, policy)?,
        })
    }

    /// Run already-built params (e.g. from a config file) through `policy`
    pub fn validated(self, policy: ParamPolicy) -> Result<Self> {
        Self::with_policy(self.velocity, self.timing, self.randomize, policy)
    }

    /// Per-note selection probability (0.0-1.0)
    pub fn randomize_chance(&self) -> f64 {
        self.randomize / 100.0
    }

    /// Maximum velocity deviation in velocity units
    pub fn velocity_range(&self) -> f64 {
        self.velocity / 100.0
    }

    /// Maximum timing deviation before clamping, in timeline percent.
    /// Divided by 10 rather than 100, so timing saturates the +/-0.5 clamp
    /// from an amount of 5 upward.
    pub fn timing_range(&self) -> f64 {
        self.timing / 10.0
    }
}

fn check(name: &'static str, value: f64, policy: ParamPolicy) -> Result<f64> {
    if !value.is_finite() {
        return Err(HumanizerError::InvalidParameter { name, value });
    }
    if (PARAM_MIN..=PARAM_MAX).contains(&value) {
        return Ok(value);
    }
    match policy {
        ParamPolicy::Reject => Err(HumanizerError::InvalidParameter { name, value }),
        ParamPolicy::Clamp => {
            let clamped = value.clamp(PARAM_MIN, PARAM_MAX);
            warn!(param = name, value, clamped, "Parameter out of range, clamping");
            Ok(clamped)
        }
    }
}
