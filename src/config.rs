//! Sampling policy handed to the measurement scheduler.
//!
//! The policy starts from the crate constants and can be overridden in code
//! or from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TB_SAMPLES` | `sample_count` |
//! | `TB_TIME_UNITS_PER_SECOND` | `time_units_per_second` |

use std::env::{self, VarError};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SAMPLE_COUNT, TIME_UNITS_PER_SECOND};

/// Environment variable overriding the sample count.
pub const ENV_SAMPLES: &str = "TB_SAMPLES";

/// Environment variable overriding the time-unit conversion factor.
pub const ENV_TIME_UNITS_PER_SECOND: &str = "TB_TIME_UNITS_PER_SECOND";

/// Sampling parameters for a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingPolicy {
    /// Timing samples per run (default: [`DEFAULT_SAMPLE_COUNT`]).
    pub sample_count: usize,

    /// Timer units per second (default: [`TIME_UNITS_PER_SECOND`]).
    pub time_units_per_second: f64,
}

/// Invalid sampling policy.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// A run needs at least one sample.
    ZeroSampleCount,
    /// Conversion factor must be finite and positive.
    InvalidTimeUnits {
        /// Rejected value.
        value: f64,
    },
    /// Environment variable could not be parsed.
    InvalidEnv {
        /// Variable name.
        key: String,
        /// Raw value found.
        value: String,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::ZeroSampleCount => write!(f, "sample count must be at least 1"),
            PolicyError::InvalidTimeUnits { value } => {
                write!(f, "time units per second must be finite and positive, got {}", value)
            }
            PolicyError::InvalidEnv { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for PolicyError {}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            time_units_per_second: TIME_UNITS_PER_SECOND,
        }
    }
}

impl SamplingPolicy {
    /// Policy built from the crate constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the sample count.
    pub fn sample_count(mut self, n: usize) -> Self {
        self.sample_count = n;
        self
    }

    /// Override the time-unit conversion factor.
    pub fn time_units_per_second(mut self, units: f64) -> Self {
        self.time_units_per_second = units;
        self
    }

    /// Check the policy is usable by a scheduler.
    pub fn validate(&self) -> Result<(), PolicyError> {
        check_sample_count(self.sample_count)?;
        check_time_units(self.time_units_per_second)
    }

    /// Convert a duration in this policy's time units to seconds.
    #[inline]
    pub fn to_seconds(self, units: f64) -> f64 {
        units / self.time_units_per_second
    }

    /// Merge overrides from the environment, rejecting malformed values.
    pub fn try_from_env(self) -> Result<Self, PolicyError> {
        let policy = self.env_sample_count()?.env_time_units()?;
        policy.validate()?;
        Ok(policy)
    }

    /// Merge overrides from the environment.
    ///
    /// Each variable is applied on its own: a malformed one is logged and
    /// skipped without discarding the others.
    pub fn from_env(self) -> Self {
        let mut policy = self;
        match policy.env_sample_count() {
            Ok(updated) => policy = updated,
            Err(err) => log::warn!("ignoring sampling override: {}", err),
        }
        match policy.env_time_units() {
            Ok(updated) => policy = updated,
            Err(err) => log::warn!("ignoring sampling override: {}", err),
        }
        policy
    }

    fn env_sample_count(self) -> Result<Self, PolicyError> {
        match parse_env::<usize>(ENV_SAMPLES)? {
            Some(n) => {
                check_sample_count(n)?;
                log::debug!("{} overrides sample count: {}", ENV_SAMPLES, n);
                Ok(self.sample_count(n))
            }
            None => Ok(self),
        }
    }

    fn env_time_units(self) -> Result<Self, PolicyError> {
        match parse_env::<f64>(ENV_TIME_UNITS_PER_SECOND)? {
            Some(units) => {
                check_time_units(units)?;
                log::debug!("{} overrides time units per second: {}", ENV_TIME_UNITS_PER_SECOND, units);
                Ok(self.time_units_per_second(units))
            }
            None => Ok(self),
        }
    }
}

fn check_sample_count(n: usize) -> Result<(), PolicyError> {
    if n == 0 {
        return Err(PolicyError::ZeroSampleCount);
    }
    Ok(())
}

fn check_time_units(units: f64) -> Result<(), PolicyError> {
    if !units.is_finite() || units <= 0.0 {
        return Err(PolicyError::InvalidTimeUnits { value: units });
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, PolicyError> {
    let raw = match env::var(key) {
        Ok(raw) => raw,
        Err(VarError::NotPresent) => return Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            return Err(PolicyError::InvalidEnv {
                key: key.to_string(),
                value: raw.to_string_lossy().into_owned(),
            })
        }
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| PolicyError::InvalidEnv {
            key: key.to_string(),
            value: raw,
        })
}
