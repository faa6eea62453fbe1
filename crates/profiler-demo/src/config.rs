// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Demo configuration
//!
//! The demo has one tunable, `DEMO_SCALE`, a positive factor applied to the
//! loop counts of the CPU-bound workloads. Recursion depths and sleeps are
//! fixed so the report shape stays the same at every scale.

use thiserror::Error;

/// Environment variable holding the workload scale
pub const SCALE_ENV: &str = "DEMO_SCALE";

/// Largest accepted scale
pub const MAX_SCALE: f64 = 100.0;

/// Errors raised while reading the demo configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("DEMO_SCALE must be a number, got '{0}'")]
    NotANumber(String),

    #[error("DEMO_SCALE must be in (0, 100], got {0}")]
    OutOfRange(f64),
}

/// Workload sizes for one demo run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Outer iterations of the trigonometric loop
    pub foo_rounds: u32,
    /// Inner iterations per round
    pub foo_iterations: u32,
    /// Empty instrumented scopes per round
    pub nop_iterations: u32,
    /// Argument of the self-recursive workload
    pub fibb_n: u32,
    /// Argument of the mutually recursive workload
    pub rec_n: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            foo_rounds: 10,
            foo_iterations: 1_000_000,
            nop_iterations: 100_000,
            fibb_n: 10,
            rec_n: 10,
        }
    }
}

impl DemoConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_scale(std::env::var(SCALE_ENV).ok().as_deref())
    }

    /// Build the configuration from an optional raw scale value
    pub fn from_scale(raw: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };

        let scale: f64 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber(raw.to_string()))?;
        if !(scale > 0.0 && scale <= MAX_SCALE) {
            return Err(ConfigError::OutOfRange(scale));
        }

        Ok(Self::default().scaled(scale))
    }

    /// Scale loop counts by `factor`, keeping at least one iteration
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |n: u32| ((n as f64 * factor).round() as u32).max(1);
        Self {
            foo_iterations: scale(self.foo_iterations),
            nop_iterations: scale(self.nop_iterations),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_unset() {
        assert_eq!(DemoConfig::from_scale(None).unwrap(), DemoConfig::default());
    }

    #[test]
    fn test_scale_applies_to_loops_only() {
        let config = DemoConfig::from_scale(Some("0.5")).unwrap();
        assert_eq!(config.foo_iterations, 500_000);
        assert_eq!(config.nop_iterations, 50_000);
        assert_eq!(config.fibb_n, 10);
        assert_eq!(config.foo_rounds, 10);
    }

    #[test]
    fn test_tiny_scale_keeps_one_iteration() {
        let config = DemoConfig::from_scale(Some("0.0000001")).unwrap();
        assert_eq!(config.foo_iterations, 1);
        assert_eq!(config.nop_iterations, 1);
    }

    #[test]
    fn test_invalid_scale() {
        assert_eq!(
            DemoConfig::from_scale(Some("fast")),
            Err(ConfigError::NotANumber("fast".to_string()))
        );
        assert_eq!(
            DemoConfig::from_scale(Some("0")),
            Err(ConfigError::OutOfRange(0.0))
        );
        assert!(DemoConfig::from_scale(Some("NaN")).is_err());
        assert!(DemoConfig::from_scale(Some("1000")).is_err());
    }
}
