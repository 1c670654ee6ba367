//! Runtime tunables for slideshow widgets.

use std::time::Duration;

use crate::constants::*;
use crate::error::{MorphError, MorphResult};

/// Timing and markup conventions shared by every widget of a runtime
#[derive(Debug, Clone, PartialEq)]
pub struct MorphConfig {
    /// Number of interpolation steps per transition
    pub step_total: u32,
    /// Time between two interpolation steps
    pub step_interval: Duration,
    /// Time between two autorun ticks
    pub autorun_interval: Duration,
    /// Attribute whose value relates elements across slides
    pub relation_attr: String,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            step_total: STEP_TOTAL,
            step_interval: Duration::from_millis(STEP_INTERVAL_MS),
            autorun_interval: Duration::from_millis(AUTORUN_INTERVAL_MS),
            relation_attr: RELATION_ATTR.to_string(),
        }
    }
}

impl MorphConfig {
    pub fn with_step_total(mut self, step_total: u32) -> Self {
        self.step_total = step_total;
        self
    }

    pub fn with_step_interval(mut self, step_interval: Duration) -> Self {
        self.step_interval = step_interval;
        self
    }

    pub fn with_autorun_interval(mut self, autorun_interval: Duration) -> Self {
        self.autorun_interval = autorun_interval;
        self
    }

    pub fn with_relation_attr(mut self, relation_attr: impl Into<String>) -> Self {
        self.relation_attr = relation_attr.into();
        self
    }

    /// Rejects values the stepper and scheduler cannot work with.
    pub fn validate(&self) -> MorphResult<()> {
        if self.step_total == 0 {
            return Err(MorphError::InvalidConfig {
                field: "step_total",
                reason: "must be at least 1",
            });
        }
        if self.step_interval.is_zero() {
            return Err(MorphError::InvalidConfig {
                field: "step_interval",
                reason: "must be non-zero",
            });
        }
        if self.autorun_interval.is_zero() {
            return Err(MorphError::InvalidConfig {
                field: "autorun_interval",
                reason: "must be non-zero",
            });
        }
        if self.relation_attr.is_empty() {
            return Err(MorphError::InvalidConfig {
                field: "relation_attr",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MorphConfig::default();
        assert_eq!(config.step_total, 10);
        assert_eq!(config.step_interval, Duration::from_millis(100));
        assert_eq!(config.autorun_interval, Duration::from_millis(2000));
        assert_eq!(config.relation_attr, "data-ss-id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_steps() {
        let config = MorphConfig::default().with_step_total(0);
        assert!(matches!(
            config.validate(),
            Err(MorphError::InvalidConfig { field: "step_total", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_intervals() {
        let config = MorphConfig::default().with_step_interval(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = MorphConfig::default().with_autorun_interval(Duration::ZERO);
        assert!(config.validate().is_err());

        let config = MorphConfig::default().with_relation_attr("");
        assert!(config.validate().is_err());
    }
}
