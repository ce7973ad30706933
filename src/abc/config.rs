//! Bee colony configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AbcError, Result};
use crate::models::CvrpInstance;
use crate::neighborhood::Operator;

/// How an onlooker's improving neighbor enters the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationPolicy {
    /// Overwrite the food source the onlooker was sent to.
    ReplaceSource,
    /// Overwrite the most stagnated food source that the neighbor beats.
    ReplaceMostStagnant,
}

/// What replaces a food source whose trial counter passed the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoutPolicy {
    /// A freshly constructed candidate.
    Reconstruct,
    /// One neighborhood move away from the abandoned candidate.
    Perturb,
}

/// The three published colony variants.
///
/// | variant | exploration | scout |
/// |---------|-------------|-------|
/// | `Original` | replace source | reconstruct |
/// | `SemiEnhanced` | replace source | perturb |
/// | `Enhanced` | replace most stagnant | perturb |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Canonical ABC.
    Original,
    /// Scouts perturb instead of restarting.
    SemiEnhanced,
    /// Scouts perturb and onlookers target stagnated sources.
    Enhanced,
}

impl Variant {
    /// All variants in publication order.
    pub const ALL: [Variant; 3] = [Variant::Original, Variant::SemiEnhanced, Variant::Enhanced];

    /// Exploration (onlooker) replacement rule.
    pub fn exploration(self) -> ExplorationPolicy {
        match self {
            Variant::Original | Variant::SemiEnhanced => ExplorationPolicy::ReplaceSource,
            Variant::Enhanced => ExplorationPolicy::ReplaceMostStagnant,
        }
    }

    /// Scout replacement rule.
    pub fn scout(self) -> ScoutPolicy {
        match self {
            Variant::Original => ScoutPolicy::Reconstruct,
            Variant::SemiEnhanced | Variant::Enhanced => ScoutPolicy::Perturb,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Original => "original",
            Variant::SemiEnhanced => "semi-enhanced",
            Variant::Enhanced => "enhanced",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration parameters for one bee colony run.
///
/// # Examples
///
/// ```
/// use abc_cvrp::abc::{AbcConfig, Variant};
/// use abc_cvrp::neighborhood::Operator;
///
/// let config = AbcConfig::for_customers(50)
///     .with_food_sources(30)
///     .with_variant(Variant::Original)
///     .with_operators(vec![Operator::Swap, Operator::Reversal])
///     .with_seed(42);
/// assert_eq!(config.stagnation_limit, 2500);
/// assert_eq!(config.iterations, 100_000);
/// assert_eq!(config.food_sources, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbcConfig {
    /// Number of food sources (employed bees), half the colony.
    pub food_sources: usize,
    /// Trials without improvement before a food source is abandoned.
    pub stagnation_limit: usize,
    /// Enabled neighborhood operators, chosen uniformly.
    pub operators: Vec<Operator>,
    /// Which replacement rules to use.
    pub variant: Variant,
    /// Initial capacity penalty weight.
    pub alpha: f64,
    /// Initial duration penalty weight.
    pub beta: f64,
    /// Relative step of the adaptive penalty update.
    pub delta: f64,
    /// Number of iterations per run.
    pub iterations: usize,
    /// Random seed (None for entropy).
    pub seed: Option<u64>,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self {
            food_sources: 25,
            stagnation_limit: 50,
            operators: vec![
                Operator::Swap,
                Operator::Reversal,
                Operator::ReversedSubsequenceSwap,
            ],
            variant: Variant::Enhanced,
            alpha: 0.1,
            beta: 0.1,
            delta: 0.001,
            iterations: 2000,
            seed: None,
        }
    }
}

impl AbcConfig {
    /// Defaults scaled to an instance of `customers` customers: limit
    /// `50·n` and `2000·n` iterations.
    pub fn for_customers(customers: usize) -> Self {
        Self {
            stagnation_limit: 50 * customers,
            iterations: 2000 * customers,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    ///
    /// ```
    /// use abc_cvrp::abc::{AbcConfig, Variant};
    ///
    /// let config = AbcConfig::from_json(r#"{"variant": "semi-enhanced", "operators": [1, 2]}"#).unwrap();
    /// assert_eq!(config.variant, Variant::SemiEnhanced);
    /// assert_eq!(config.operators.len(), 2);
    /// assert_eq!(config.food_sources, 25);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the number of food sources.
    pub fn with_food_sources(mut self, n: usize) -> Self {
        self.food_sources = n;
        self
    }

    /// Sets the abandonment limit.
    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    /// Sets the enabled operators.
    pub fn with_operators(mut self, operators: Vec<Operator>) -> Self {
        self.operators = operators;
        self
    }

    /// Sets the variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the initial penalty weights.
    pub fn with_penalty(mut self, alpha: f64, beta: f64) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets the penalty update step.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the iteration count.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration against an instance before any iteration.
    pub fn validate(&self, instance: &CvrpInstance) -> Result<()> {
        if self.food_sources == 0 {
            return Err(AbcError::InvalidConfig(
                "food_sources must be positive".into(),
            ));
        }
        if self.stagnation_limit == 0 {
            return Err(AbcError::InvalidConfig(
                "stagnation_limit must be positive".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(AbcError::InvalidConfig("iterations must be positive".into()));
        }
        if self.operators.is_empty() {
            return Err(AbcError::InvalidConfig(
                "at least one operator must be enabled".into(),
            ));
        }
        for (i, op) in self.operators.iter().enumerate() {
            if self.operators[..i].contains(op) {
                return Err(AbcError::InvalidConfig(format!(
                    "operator {} listed twice",
                    op.id()
                )));
            }
        }
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AbcError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(AbcError::InvalidConfig(format!(
                "delta must be finite and positive, got {}",
                self.delta
            )));
        }
        let len = instance.num_customers();
        for op in &self.operators {
            op.check_len(len)?;
        }
        Ok(())
    }
}
