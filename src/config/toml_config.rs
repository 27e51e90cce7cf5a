use crate::core::availability::{HttpAvailabilitySource, DEFAULT_WINDOW_MONTHS};
use crate::core::bootstrap::CalendarBootstrap;
use crate::domain::model::{DateValue, InvalidationPolicy, PickerOptions};
use crate::utils::error::{CalendarError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub range: RangeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Format of the submitted value.
    pub date_format: String,
    /// Format shown to the user.
    pub alt_format: String,
    /// Typed input on the range fields. Plain date inputs always accept it.
    pub allow_input: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        let options = PickerOptions::default();
        Self {
            date_format: options.date_format,
            alt_format: options.alt_format,
            allow_input: options.allow_input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub policy: InvalidationPolicy,
    pub window_months: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            policy: InvalidationPolicy::default(),
            window_months: DEFAULT_WINDOW_MONTHS,
        }
    }
}

impl CalendarConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalendarError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CalendarError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalendarError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_date_format("picker.date_format", &self.picker.date_format)?;
        validation::validate_date_format("picker.alt_format", &self.picker.alt_format)?;
        validation::validate_range("range.window_months", self.range.window_months, 1, 120)?;
        Ok(())
    }

    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            date_format: self.picker.date_format.clone(),
            alt_format: self.picker.alt_format.clone(),
            allow_input: self.picker.allow_input,
            ..Default::default()
        }
    }

    pub fn bootstrap(&self, today: DateValue) -> CalendarBootstrap {
        CalendarBootstrap::new(today)
            .with_picker_options(self.picker_options())
            .with_policy(self.range.policy)
            .with_window_months(self.range.window_months)
    }

    pub fn availability_source(&self) -> Result<HttpAvailabilitySource> {
        HttpAvailabilitySource::new(&self.api.base_url)
    }
}

impl Validate for CalendarConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CalendarConfig::from_toml_str("").unwrap();
        assert_eq!(config, CalendarConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.picker.date_format, "Y-m-d");
        assert_eq!(config.picker.alt_format, "F j, Y");
        assert_eq!(config.range.policy, InvalidationPolicy::InclusiveDisable);
        assert_eq!(config.range.window_months, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = CalendarConfig::from_toml_str(
            r#"
[api]
base_url = "https://hotel.example"

[picker]
alt_format = "D, M j"
allow_input = true

[range]
policy = "disabled-only"
window_months = 6
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://hotel.example");
        assert_eq!(config.picker.date_format, "Y-m-d");
        assert!(config.picker.allow_input);
        assert_eq!(config.range.policy, InvalidationPolicy::DisabledOnly);
        assert_eq!(config.range.window_months, 6);

        let options = config.picker_options();
        assert_eq!(options.alt_format, "D, M j");
        assert!(options.disabled.is_empty());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("BOOKING_CALENDAR_TEST_HOST", "https://env.example");
        let config = CalendarConfig::from_toml_str(
            r#"
[api]
base_url = "${BOOKING_CALENDAR_TEST_HOST}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://env.example");

        let unset = CalendarConfig::from_toml_str(
            r#"
[api]
base_url = "${BOOKING_CALENDAR_TEST_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(unset.api.base_url, "${BOOKING_CALENDAR_TEST_UNSET}");
        assert!(unset.validate().is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(CalendarConfig::from_toml_str("[range]\npolicy = \"strict\"").is_err());

        let mut config = CalendarConfig::default();
        config.range.window_months = 0;
        assert!(config.validate().is_err());

        let mut config = CalendarConfig::default();
        config.picker.alt_format = "Week W".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://127.0.0.1:9000\"").unwrap();

        let config = CalendarConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert!(CalendarConfig::from_file("/nonexistent/calendar.toml").is_err());
    }
}
