//! Builder API for creating carousel configurations.

use crate::config::error::ConfigError;
use crate::config::CarouselConfig;
use std::time::Duration;

/// Builder for creating a validated [`CarouselConfig`]
#[derive(Clone, Debug, Default)]
pub struct CarouselConfigBuilder {
    config: CarouselConfig,
}

impl CarouselConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the period between automatic advances.
    ///
    /// Sub-millisecond precision is dropped.
    pub fn auto_advance_interval(mut self, interval: Duration) -> Self {
        self.config.auto_advance_interval_ms = duration_to_millis(interval);
        self
    }

    /// Enable or disable automatic advancing
    pub fn auto_rotate(mut self, enabled: bool) -> Self {
        self.config.auto_rotate = enabled;
        self
    }

    pub fn show_controls(mut self, show: bool) -> Self {
        self.config.show_controls = show;
        self
    }

    /// Cap the navigation history (0 disables it)
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Build the configuration, reporting every violated rule.
    pub fn build(self) -> Result<CarouselConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

pub(crate) fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigViolation;

    #[test]
    fn builder_starts_from_defaults() {
        let config = CarouselConfigBuilder::new().build().unwrap();
        assert_eq!(config, CarouselConfig::default());
    }

    #[test]
    fn builder_sets_every_field() {
        let config = CarouselConfigBuilder::new()
            .auto_advance_interval(Duration::from_millis(3000))
            .auto_rotate(false)
            .show_controls(false)
            .history_limit(0)
            .build()
            .unwrap();

        assert_eq!(config.auto_advance_interval_ms, 3000);
        assert!(!config.auto_rotate);
        assert!(!config.show_controls);
        assert_eq!(config.history_limit, 0);
    }

    #[test]
    fn sub_millisecond_interval_is_zero() {
        let result = CarouselConfigBuilder::new()
            .auto_advance_interval(Duration::from_micros(500))
            .build();

        assert_eq!(
            result,
            Err(ConfigError::Invalid(vec![ConfigViolation::ZeroInterval]))
        );
    }

    #[test]
    fn huge_interval_saturates_then_fails() {
        let result = CarouselConfigBuilder::new()
            .auto_advance_interval(Duration::MAX)
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ref v)) if matches!(v[0], ConfigViolation::IntervalTooLong { .. })
        ));
    }
}
