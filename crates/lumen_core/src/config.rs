//! Lumen configuration
//!
//! Component defaults (tooltip delays, toast lifetime, pagination budget and
//! labels) live in a single `lumen.toml`. Every field is optional; anything
//! missing falls back to the standard preset.
//!
//! ```toml
//! [tooltip]
//! delay_show_ms = 300
//!
//! [pagination]
//! max_visible_pages = 7
//! show_first_last = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{LumenError, Result};

/// Top-level configuration shared by every component built from a context
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LumenConfig {
    #[serde(default)]
    pub tooltip: TooltipConfig,
    #[serde(default)]
    pub toast: ToastConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
    #[serde(default)]
    pub number_field: NumberFieldConfig,
}

/// Tooltip hover delays
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TooltipConfig {
    /// Delay between hover start and the tooltip appearing
    #[serde(default = "default_delay_show_ms")]
    pub delay_show_ms: u64,
    /// Delay between hover end and the tooltip disappearing
    #[serde(default = "default_delay_hide_ms")]
    pub delay_hide_ms: u64,
}

fn default_delay_show_ms() -> u64 {
    200
}

fn default_delay_hide_ms() -> u64 {
    100
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            delay_show_ms: default_delay_show_ms(),
            delay_hide_ms: default_delay_hide_ms(),
        }
    }
}

impl TooltipConfig {
    pub fn delay_show(&self) -> Duration {
        Duration::from_millis(self.delay_show_ms)
    }

    pub fn delay_hide(&self) -> Duration {
        Duration::from_millis(self.delay_hide_ms)
    }
}

/// Toast lifetime
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ToastConfig {
    /// Auto-dismiss delay; 0 keeps toasts until closed explicitly
    #[serde(default = "default_auto_close_ms")]
    pub auto_close_ms: u64,
}

fn default_auto_close_ms() -> u64 {
    5000
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            auto_close_ms: default_auto_close_ms(),
        }
    }
}

impl ToastConfig {
    pub fn auto_close(&self) -> Duration {
        Duration::from_millis(self.auto_close_ms)
    }
}

/// Pagination defaults
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PaginationConfig {
    #[serde(default = "default_max_visible_pages")]
    pub max_visible_pages: usize,
    #[serde(default = "default_true")]
    pub show_previous_next: bool,
    #[serde(default)]
    pub show_first_last: bool,
    #[serde(default = "default_previous_label")]
    pub previous_label: String,
    #[serde(default = "default_next_label")]
    pub next_label: String,
    #[serde(default = "default_first_label")]
    pub first_label: String,
    #[serde(default = "default_last_label")]
    pub last_label: String,
}

fn default_max_visible_pages() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_previous_label() -> String {
    "← Previous".to_string()
}

fn default_next_label() -> String {
    "Next →".to_string()
}

fn default_first_label() -> String {
    "← First".to_string()
}

fn default_last_label() -> String {
    "Last →".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_visible_pages: default_max_visible_pages(),
            show_previous_next: true,
            show_first_last: false,
            previous_label: default_previous_label(),
            next_label: default_next_label(),
            first_label: default_first_label(),
            last_label: default_last_label(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AutocompleteConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_placeholder() -> String {
    "Search...".to_string()
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NumberFieldConfig {
    /// Increment used by step up/down when a field sets none
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_step() -> f64 {
    1.0
}

impl Default for NumberFieldConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
        }
    }
}

impl LumenConfig {
    /// Standard configuration, identical to `Default`
    pub fn standard() -> Self {
        Self::default()
    }

    /// All delays zeroed: tooltips react on the next timer tick and toasts
    /// stay until closed
    pub fn instant() -> Self {
        Self {
            tooltip: TooltipConfig {
                delay_show_ms: 0,
                delay_hide_ms: 0,
            },
            toast: ToastConfig { auto_close_ms: 0 },
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Reject values that would leave a component without sensible behavior
    pub fn validate(&self) -> Result<()> {
        if self.pagination.max_visible_pages == 0 {
            return Err(LumenError::InvalidConfig(
                "pagination.max_visible_pages must be at least 1".to_string(),
            ));
        }
        if !(self.number_field.step.is_finite() && self.number_field.step > 0.0) {
            return Err(LumenError::InvalidConfig(format!(
                "number_field.step must be a positive number, got {}",
                self.number_field.step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LumenConfig::standard();
        assert_eq!(config.tooltip.delay_show(), Duration::from_millis(200));
        assert_eq!(config.tooltip.delay_hide(), Duration::from_millis(100));
        assert_eq!(config.toast.auto_close(), Duration::from_millis(5000));
        assert_eq!(config.pagination.max_visible_pages, 5);
        assert!(config.pagination.show_previous_next);
        assert!(!config.pagination.show_first_last);
        assert_eq!(config.autocomplete.placeholder, "Search...");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LumenConfig::from_toml_str(
            r#"
            [tooltip]
            delay_show_ms = 350

            [pagination]
            show_first_last = true
            "#,
        )
        .unwrap();

        assert_eq!(config.tooltip.delay_show_ms, 350);
        assert_eq!(config.tooltip.delay_hide_ms, 100);
        assert!(config.pagination.show_first_last);
        assert_eq!(config.pagination.next_label, "Next →");
    }

    #[test]
    fn test_empty_toml_is_standard() {
        assert_eq!(LumenConfig::from_toml_str("").unwrap(), LumenConfig::standard());
    }

    #[test]
    fn test_toml_string_reparses() {
        let config = LumenConfig::instant();
        let text = config.to_toml_string().unwrap();
        assert_eq!(LumenConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_visible_pages() {
        let err = LumenConfig::from_toml_str("[pagination]\nmax_visible_pages = 0\n").unwrap_err();
        assert!(matches!(err, LumenError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_step() {
        let err = LumenConfig::from_toml_str("[number_field]\nstep = -2.0\n").unwrap_err();
        assert!(matches!(err, LumenError::InvalidConfig(_)));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = LumenConfig::from_toml_str("[tooltip\n").unwrap_err();
        assert!(matches!(err, LumenError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LumenConfig::load("/nonexistent/lumen.toml").unwrap_err();
        assert!(matches!(err, LumenError::Io(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("lumen-config-{}.toml", std::process::id()));
        let mut config = LumenConfig::standard();
        config.toast.auto_close_ms = 1200;
        config.save(&path).unwrap();

        let loaded = LumenConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.toast.auto_close_ms, 1200);
    }
}
