//! Humanizer engine: owns the base pattern and the current randomized variant

use tracing::{debug, info};

use crate::config::HumanizerConfig;
use crate::error::{HumanizerError, Result};
use crate::humanize::recompute;
use crate::params::{HumanizeParams, ParamPolicy};
use crate::pattern::{Pattern, generate_base_pattern};
use crate::presets::find_preset;
use crate::random::RandomSource;

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No base pattern yet
    Uninitialized,
    /// Base pattern exists; any number of recomputes may have happened
    Ready,
}

#[derive(Debug, Clone)]
struct Patterns {
    base: Pattern,
    randomized: Pattern,
}

/// Host-facing humanizer.
///
/// Call [`Humanizer::initialize`] once, then [`Humanizer::set_parameters`]
/// whenever a control changes and read back the randomized pattern.
#[derive(Debug)]
pub struct Humanizer<R: RandomSource> {
    rng: R,
    params: HumanizeParams,
    defaults: HumanizeParams,
    policy: ParamPolicy,
    patterns: Option<Patterns>,
}

impl Humanizer<fastrand::Rng> {
    pub fn from_config(config: &HumanizerConfig) -> Result<Self> {
        Self::with_params(config.rng(), config.defaults, config.policy)
    }
}

impl<R: RandomSource> Humanizer<R> {
    /// Stock default parameters, out-of-range input clamped
    pub fn new(rng: R) -> Self {
        let params = HumanizeParams::default();
        Self {
            rng,
            params,
            defaults: params,
            policy: ParamPolicy::default(),
            patterns: None,
        }
    }

    /// `params` become both the starting values and the `reset` target
    pub fn with_params(rng: R, params: HumanizeParams, policy: ParamPolicy) -> Result<Self> {
        let params = params.validated(policy)?;
        Ok(Self {
            rng,
            params,
            defaults: params,
            policy,
            patterns: None,
        })
    }

    pub fn state(&self) -> EngineState {
        match self.patterns {
            Some(_) => EngineState::Ready,
            None => EngineState::Uninitialized,
        }
    }

    pub fn params(&self) -> &HumanizeParams {
        &self.params
    }

    pub fn policy(&self) -> ParamPolicy {
        self.policy
    }

    pub fn base_pattern(&self) -> Option<&Pattern> {
        self.patterns.as_ref().map(|p| &p.base)
    }

    /// Randomized pattern from the most recent recompute
    pub fn pattern(&self) -> Option<&Pattern> {
        self.patterns.as_ref().map(|p| &p.randomized)
    }

    /// Generate the base pattern and run a first recompute.
    ///
    /// Later calls return the existing base pattern unchanged.
    pub fn initialize(&mut self) -> &Pattern {
        let patterns = match self.patterns.take() {
            Some(existing) => {
                debug!("Humanizer already initialized");
                existing
            }
            None => {
                let base = generate_base_pattern();
                let randomized = recompute(&base, &self.params, &mut self.rng);
                info!(events = base.len(), "Base pattern generated");
                Patterns { base, randomized }
            }
        };
        &self.patterns.insert(patterns).base
    }

    /// Apply new parameter values and recompute
    pub fn set_parameters(&mut self, velocity: f64, timing: f64, randomize: f64) -> Result<&Pattern> {
        if self.patterns.is_none() {
            return Err(HumanizerError::NotInitialized);
        }
        self.params = HumanizeParams::with_policy(velocity, timing, randomize, self.policy)?;
        self.rerandomize()
    }

    /// Switch to a factory preset by name
    pub fn apply_preset(&mut self, name: &str) -> Result<&Pattern> {
        let preset = find_preset(name)?;
        debug!(preset = %preset.name, "Applying preset");
        let HumanizeParams { velocity, timing, randomize } = preset.params;
        self.set_parameters(velocity, timing, randomize)
    }

    /// Restore the default parameters and recompute
    pub fn reset(&mut self) -> Result<&Pattern> {
        let HumanizeParams { velocity, timing, randomize } = self.defaults;
        self.set_parameters(velocity, timing, randomize)
    }

    /// Draw a fresh randomized pattern with the current parameters
    pub fn rerandomize(&mut self) -> Result<&Pattern> {
        let Some(patterns) = self.patterns.as_mut() else {
            return Err(HumanizerError::NotInitialized);
        };
        patterns.randomized = recompute(&patterns.base, &self.params, &mut self.rng);
        debug!(
            velocity = self.params.velocity,
            timing = self.params.timing,
            randomize = self.params.randomize,
            randomized = patterns.randomized.randomized_count(),
            "Pattern recomputed"
        );
        Ok(&patterns.randomized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PATTERN_LEN;
    use crate::random::SequenceSource;

    fn seeded(seed: u64) -> Humanizer<fastrand::Rng> {
        Humanizer::new(fastrand::Rng::with_seed(seed))
    }

    #[test]
    fn test_state_machine() {
        let mut humanizer = seeded(1);
        assert_eq!(humanizer.state(), EngineState::Uninitialized);
        assert!(humanizer.base_pattern().is_none());
        assert!(humanizer.pattern().is_none());

        humanizer.initialize();
        assert_eq!(humanizer.state(), EngineState::Ready);
        assert!(humanizer.pattern().is_some());

        humanizer.set_parameters(10.0, 10.0, 10.0).unwrap();
        assert_eq!(humanizer.state(), EngineState::Ready);
    }

    #[test]
    fn test_set_parameters_before_initialize_fails() {
        let mut humanizer = seeded(1);
        let err = humanizer.set_parameters(10.0, 10.0, 10.0).unwrap_err();
        assert!(matches!(err, HumanizerError::NotInitialized));
        assert!(matches!(humanizer.rerandomize(), Err(HumanizerError::NotInitialized)));
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut humanizer = seeded(2);
        let first = humanizer.initialize().clone();
        humanizer.set_parameters(100.0, 100.0, 100.0).unwrap();
        let second = humanizer.initialize().clone();
        assert_eq!(first, second);
        assert_eq!(first, generate_base_pattern());
    }

    #[test]
    fn test_base_pattern_survives_many_updates() {
        let mut humanizer = seeded(3);
        let snapshot = humanizer.initialize().clone();
        for step in 0..=10 {
            let amount = step as f64 * 10.0;
            humanizer.set_parameters(amount, 100.0 - amount, amount).unwrap();
        }
        humanizer.apply_preset("Chaotic").unwrap();
        humanizer.reset().unwrap();
        assert_eq!(humanizer.base_pattern(), Some(&snapshot));
    }

    #[test]
    fn test_set_parameters_returns_current_pattern() {
        let mut humanizer = seeded(4);
        humanizer.initialize();
        let returned = humanizer.set_parameters(30.0, 30.0, 100.0).unwrap().clone();
        assert_eq!(returned.len(), PATTERN_LEN);
        assert_eq!(returned.randomized_count(), PATTERN_LEN);
        assert_eq!(humanizer.pattern(), Some(&returned));
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut a = seeded(77);
        let mut b = seeded(77);
        a.initialize();
        b.initialize();
        let pa = a.set_parameters(45.0, 12.0, 80.0).unwrap().clone();
        let pb = b.set_parameters(45.0, 12.0, 80.0).unwrap().clone();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_golden_sequence_through_engine() {
        let mut humanizer = Humanizer::with_params(
            SequenceSource::new([0.0, 1.0, 0.0]),
            HumanizeParams::new(50.0, 50.0, 100.0).unwrap(),
            ParamPolicy::Reject,
        )
        .unwrap();
        // Every note draws three values, so the sequence stays aligned across recomputes
        humanizer.initialize();
        assert_eq!(humanizer.pattern().unwrap().randomized_count(), PATTERN_LEN);

        let pattern = humanizer.set_parameters(50.0, 50.0, 100.0).unwrap();
        for note in pattern {
            assert!(note.was_randomized);
            assert_eq!(note.randomized_velocity, Some(1.0));
            assert_eq!(note.randomized_timing_offset, -0.5);
        }
    }

    #[test]
    fn test_clamp_policy_applies_on_set() {
        let mut humanizer = seeded(5);
        humanizer.initialize();
        humanizer.set_parameters(250.0, -3.0, 100.0).unwrap();
        assert_eq!(humanizer.params(), &HumanizeParams { velocity: 100.0, timing: 0.0, randomize: 100.0 });
    }

    #[test]
    fn test_reject_policy_keeps_previous_params() {
        let mut humanizer =
            Humanizer::with_params(fastrand::Rng::with_seed(6), HumanizeParams::default(), ParamPolicy::Reject).unwrap();
        humanizer.initialize();
        let before = humanizer.pattern().cloned();

        let err = humanizer.set_parameters(10.0, 120.0, 10.0).unwrap_err();
        assert!(matches!(err, HumanizerError::InvalidParameter { name: "timing", .. }));
        assert_eq!(humanizer.params(), &HumanizeParams::default());
        assert_eq!(humanizer.pattern().cloned(), before);
    }

    #[test]
    fn test_presets_and_reset() {
        let mut humanizer = seeded(8);
        humanizer.initialize();

        humanizer.apply_preset("Subtle Groove").unwrap();
        assert_eq!(humanizer.params(), &HumanizeParams { velocity: 15.0, timing: 10.0, randomize: 30.0 });

        assert!(matches!(humanizer.apply_preset("Nope"), Err(HumanizerError::UnknownPreset(_))));

        humanizer.reset().unwrap();
        assert_eq!(humanizer.params(), &HumanizeParams::default());
    }

    #[test]
    fn test_from_config() {
        let config = HumanizerConfig::from_toml_str(
            r#"
            seed = 1234
            [defaults]
            velocity = 5.0
            timing = 5.0
            randomize = 100.0
            "#,
        )
        .unwrap();

        let mut a = Humanizer::from_config(&config).unwrap();
        let mut b = Humanizer::from_config(&config).unwrap();
        a.initialize();
        b.initialize();
        assert_eq!(a.pattern(), b.pattern());
        assert_eq!(a.pattern().unwrap().randomized_count(), PATTERN_LEN);

        a.set_parameters(90.0, 90.0, 0.0).unwrap();
        a.reset().unwrap();
        assert_eq!(a.params().randomize, 100.0);
    }

    #[test]
    fn test_invalid_config_defaults_rejected() {
        let config = HumanizerConfig {
            defaults: HumanizeParams { velocity: 500.0, timing: 0.0, randomize: 0.0 },
            policy: ParamPolicy::Reject,
            seed: Some(1),
        };
        assert!(Humanizer::from_config(&config).is_err());
    }
}
