//! Carousel configuration.
//!
//! Validation accumulates every violation with Stillwater's `Validation`
//! instead of stopping at the first one, so a caller fixing a bad config
//! sees all of its problems at once.
//!
//! # Example
//!
//! ```rust
//! use carousel::config::CarouselConfig;
//! use std::time::Duration;
//!
//! let config = CarouselConfig::builder()
//!     .auto_advance_interval(Duration::from_secs(3))
//!     .auto_rotate(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.auto_advance_interval(), Duration::from_secs(3));
//!
//! let parsed = CarouselConfig::from_json(r#"{ "auto_rotate": false }"#).unwrap();
//! assert_eq!(parsed.auto_advance_interval_ms, 5000);
//! assert!(!parsed.auto_rotate);
//! ```

pub mod builder;
pub mod error;

pub use builder::CarouselConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use crate::core::NavigationHistory;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Default period between automatic advances.
pub const DEFAULT_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(5000);

/// Longest accepted period between automatic advances.
pub const MAX_AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Settings recognised by the carousel controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Period between automatic advances, in milliseconds
    pub auto_advance_interval_ms: u64,

    /// Whether automatic advancing is enabled at all
    pub auto_rotate: bool,

    /// Whether the view renders previous/next and indicator controls
    pub show_controls: bool,

    /// Navigation records kept for diagnostics (0 disables history)
    pub history_limit: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_interval_ms: DEFAULT_AUTO_ADVANCE_INTERVAL.as_millis() as u64,
            auto_rotate: true,
            show_controls: true,
            history_limit: NavigationHistory::DEFAULT_LIMIT,
        }
    }
}

impl CarouselConfig {
    pub fn builder() -> CarouselConfigBuilder {
        CarouselConfigBuilder::new()
    }

    pub fn auto_advance_interval(&self) -> Duration {
        Duration::from_millis(self.auto_advance_interval_ms)
    }

    /// Parse a JSON document and validate it. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every rule, reporting ALL violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_interval(self.auto_advance_interval())
    }
}

/// Validate an auto-advance period on its own.
fn check_interval(interval: Duration) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    let checks = vec![
        if interval.is_zero() {
            Validation::fail(ConfigViolation::ZeroInterval)
        } else {
            Validation::success(())
        },
        if interval > MAX_AUTO_ADVANCE_INTERVAL {
            Validation::fail(ConfigViolation::IntervalTooLong {
                max: MAX_AUTO_ADVANCE_INTERVAL,
                actual: interval,
            })
        } else {
            Validation::success(())
        },
    ];

    Validation::all_vec(checks).map(|_| ())
}

/// [`check_interval`] as a `Result`.
pub(crate) fn validate_interval(interval: Duration) -> Result<(), ConfigError> {
    match check_interval(interval) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(ConfigError::Invalid(
            errors.iter().cloned().collect(),
        )),
    }
}
