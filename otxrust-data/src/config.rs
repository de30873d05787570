//! Sampler configuration.
//!
//! `SamplerConfig` carries every knob of the adaptive and balanced samplers.
//! It can be built in code or loaded from JSON:
//!
//! ```rust
//! use otxrust_data::config::{RepeatPolicy, SamplerConfig};
//!
//! let config = SamplerConfig::from_json(r#"{"samples_per_gpu": 8, "n_repeats": 3}"#).unwrap();
//! assert_eq!(config.n_repeats, RepeatPolicy::Fixed(3.0));
//! assert!(config.shuffle);
//! ```

use otxrust_core::{DistributedContext, OtxError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many times each item is visited per epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRepeat", into = "RawRepeat")]
pub enum RepeatPolicy {
    /// Derive the factor from dataset size and batch size.
    Auto,
    /// Use this value, truncated toward zero.
    Fixed(f64),
}

impl RepeatPolicy {
    /// Checks that a fixed value is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), OtxError> {
        match *self {
            RepeatPolicy::Auto => Ok(()),
            RepeatPolicy::Fixed(n) if n.is_finite() && n >= 0.0 => Ok(()),
            RepeatPolicy::Fixed(n) => Err(OtxError::invalid(format!(
                "n_repeats: {} should be auto or a non-negative number",
                n
            ))),
        }
    }
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        RepeatPolicy::Auto
    }
}

impl FromStr for RepeatPolicy {
    type Err = OtxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(RepeatPolicy::Auto);
        }
        let n: f64 = s.parse().map_err(|_| {
            OtxError::invalid(format!("n_repeats: {:?} should be auto or a number", s))
        })?;
        let policy = RepeatPolicy::Fixed(n);
        policy.validate()?;
        Ok(policy)
    }
}

impl fmt::Display for RepeatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatPolicy::Auto => write!(f, "auto"),
            RepeatPolicy::Fixed(n) => write!(f, "{}", n),
        }
    }
}

/// Wire form of `RepeatPolicy`: either `"auto"` (or numeric text) or a number.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRepeat {
    Number(f64),
    Text(String),
}

impl TryFrom<RawRepeat> for RepeatPolicy {
    type Error = OtxError;

    fn try_from(raw: RawRepeat) -> Result<Self, Self::Error> {
        match raw {
            RawRepeat::Number(n) => {
                let policy = RepeatPolicy::Fixed(n);
                policy.validate()?;
                Ok(policy)
            }
            RawRepeat::Text(text) => text.parse(),
        }
    }
}

impl From<RepeatPolicy> for RawRepeat {
    fn from(policy: RepeatPolicy) -> Self {
        match policy {
            RepeatPolicy::Auto => RawRepeat::Text("auto".to_string()),
            RepeatPolicy::Fixed(n) => RawRepeat::Number(n),
        }
    }
}

/// Options shared by `AdaptiveSampler` and `BalancedSampler`.
///
/// `shuffle` and `seed` only matter to the adaptive sampler;
/// `efficient_mode` and `drop_last` only to the balanced one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Per-device batch size. Feeds the repeat heuristic only.
    pub samples_per_gpu: usize,
    #[serde(default = "default_num_replicas")]
    pub num_replicas: usize,
    #[serde(default)]
    pub rank: usize,
    #[serde(default = "default_true")]
    pub shuffle: bool,
    #[serde(default = "default_coef")]
    pub coef: f64,
    #[serde(default = "default_min_repeat")]
    pub min_repeat: f64,
    #[serde(default)]
    pub n_repeats: RepeatPolicy,
    /// Shuffle seed; must match across replicas. Drawn from the caller's
    /// generator when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub efficient_mode: bool,
    #[serde(default)]
    pub drop_last: bool,
}

fn default_num_replicas() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_coef() -> f64 {
    -0.7
}

fn default_min_repeat() -> f64 {
    1.0
}

impl SamplerConfig {
    /// Creates a configuration with every optional knob at its default.
    pub fn new(samples_per_gpu: usize) -> Self {
        Self {
            samples_per_gpu,
            num_replicas: default_num_replicas(),
            rank: 0,
            shuffle: true,
            coef: default_coef(),
            min_repeat: default_min_repeat(),
            n_repeats: RepeatPolicy::Auto,
            seed: None,
            efficient_mode: true,
            drop_last: false,
        }
    }

    /// Loads a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::ConfigParse` when the document is malformed or holds
    /// an unusable `n_repeats`.
    pub fn from_json(json: &str) -> Result<Self, OtxError> {
        serde_json::from_str(json).map_err(|e| OtxError::ConfigParse(e.to_string()))
    }

    pub fn with_distributed(mut self, ctx: DistributedContext) -> Self {
        self.num_replicas = ctx.num_replicas();
        self.rank = ctx.rank();
        self
    }

    pub fn with_n_repeats(mut self, n_repeats: RepeatPolicy) -> Self {
        self.n_repeats = n_repeats;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_min_repeat(mut self, min_repeat: f64) -> Self {
        self.min_repeat = min_repeat;
        self
    }

    pub fn with_efficient_mode(mut self, efficient_mode: bool) -> Self {
        self.efficient_mode = efficient_mode;
        self
    }

    pub fn with_drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// Validates the knobs every sampler depends on and returns the
    /// process identity they describe.
    ///
    /// # Errors
    ///
    /// Returns `OtxError::InvalidArgument` for a zero batch size, a bad
    /// replica/rank pair, a `min_repeat` below 1 or a malformed `n_repeats`.
    pub fn validate(&self) -> Result<DistributedContext, OtxError> {
        if self.samples_per_gpu == 0 {
            return Err(OtxError::invalid("samples_per_gpu must be positive"));
        }
        if !self.min_repeat.is_finite() || self.min_repeat < 1.0 {
            return Err(OtxError::invalid(format!(
                "min_repeat must be >= 1.0, got {}",
                self.min_repeat
            )));
        }
        if !self.coef.is_finite() {
            return Err(OtxError::invalid("coef must be finite"));
        }
        self.n_repeats.validate()?;
        DistributedContext::new(self.num_replicas, self.rank)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
