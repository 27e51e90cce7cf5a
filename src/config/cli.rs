use crate::config::CalendarConfig;
use crate::domain::model::{DateValue, InvalidationPolicy};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "booking-calendar")]
#[command(about = "Drive the room booking date pickers headlessly")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Page description listing the form fields
    #[arg(short, long)]
    pub page: PathBuf,

    /// Override the booking API base URL from config
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the end-date invalidation policy (inclusive-disable, disabled-only)
    #[arg(long)]
    pub policy: Option<InvalidationPolicy>,

    /// Start date to select (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<DateValue>,

    /// End date to select (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<DateValue>,

    /// Date treated as today (defaults to the local date)
    #[arg(long)]
    pub today: Option<DateValue>,

    /// Skip the availability request
    #[arg(long)]
    pub offline: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file (or defaults) and applies command line overrides.
    pub fn resolve(&self) -> Result<CalendarConfig> {
        let mut config = match &self.config {
            Some(path) => CalendarConfig::from_file(path)?,
            None => CalendarConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(policy) = self.policy {
            config.range.policy = policy;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn today(&self) -> DateValue {
        self.today.unwrap_or_else(DateValue::today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args_and_overrides() {
        let cli = CliConfig::parse_from([
            "booking-calendar",
            "--page",
            "form.toml",
            "--base-url",
            "https://hotel.example",
            "--policy",
            "disabled-only",
            "--start",
            "2024-05-01",
            "--today",
            "2024-04-01",
        ]);

        assert_eq!(cli.start, Some("2024-05-01".parse().unwrap()));
        assert_eq!(cli.end, None);
        assert_eq!(cli.today(), "2024-04-01".parse().unwrap());

        let config = cli.resolve().unwrap();
        assert_eq!(config.api.base_url, "https://hotel.example");
        assert_eq!(config.range.policy, InvalidationPolicy::DisabledOnly);
    }

    #[test]
    fn test_invalid_date_argument() {
        let parsed = CliConfig::try_parse_from([
            "booking-calendar",
            "--page",
            "form.toml",
            "--start",
            "May 1st",
        ]);
        assert!(parsed.is_err());
    }
}
