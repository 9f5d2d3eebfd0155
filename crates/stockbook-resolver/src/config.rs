//! Resolver configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables for a form session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Stock shown in an empty form
    pub default_stock: u32,
    /// Price shown in an empty form
    pub default_price: f64,
    /// Seconds before a submit confirmation is cleared
    pub notice_ttl_secs: u64,
    /// Rows visible at once in the publisher list
    pub dropdown_visible_rows: usize,
    /// Source name used when the external catalog does not report one
    pub external_source_fallback: String,
}

impl ResolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With initial stock
    #[inline]
    #[must_use]
    pub fn with_default_stock(mut self, stock: u32) -> Self {
        self.default_stock = stock;
        self
    }

    /// With notice lifetime
    #[inline]
    #[must_use]
    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl_secs = ttl.as_secs();
        self
    }

    /// With publisher list height
    #[inline]
    #[must_use]
    pub fn with_visible_rows(mut self, rows: usize) -> Self {
        self.dropdown_visible_rows = rows;
        self
    }

    /// Notice lifetime as a duration
    #[inline]
    #[must_use]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError`] on syntax errors or out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or is invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first bad value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_stock < 1 {
            return Err(ConfigError::Invalid(
                "default_stock must be at least 1".to_string(),
            ));
        }
        if !self.default_price.is_finite() || self.default_price < 0.0 {
            return Err(ConfigError::Invalid(
                "default_price must be a non-negative number".to_string(),
            ));
        }
        if self.dropdown_visible_rows == 0 {
            return Err(ConfigError::Invalid(
                "dropdown_visible_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_stock: 1,
            default_price: 0.0,
            notice_ttl_secs: 10,
            dropdown_visible_rows: 6,
            external_source_fallback: "external source".to_string(),
        }
    }
}
