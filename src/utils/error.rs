use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    ApiStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    DateParseError { value: String },

    #[error("Date '{value}' does not match format '{format}'")]
    DateFormatMismatch { value: String, format: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Date {date} cannot be selected: {reason}")]
    Unselectable { date: String, reason: String },

    #[error("End date {end} must be after start date {start}")]
    InvalidRange { start: String, end: String },
}

impl CalendarError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            CalendarError::ApiError(_) | CalendarError::ApiStatus { .. } => {
                "Could not load room availability from the booking API".to_string()
            }
            CalendarError::IoError(e) => format!("Could not read file: {}", e),
            CalendarError::SerializationError(_) => {
                "The booking API returned an unexpected response".to_string()
            }
            CalendarError::DateParseError { value } => {
                format!("'{}' is not a valid date (use YYYY-MM-DD)", value)
            }
            CalendarError::DateFormatMismatch { value, format } => {
                format!("'{}' is not a valid date (use {})", value, format)
            }
            CalendarError::ConfigError { message } => format!("Configuration problem: {}", message),
            CalendarError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            CalendarError::Unselectable { date, reason } => {
                format!("{} is not available ({})", date, reason)
            }
            CalendarError::InvalidRange { .. } => {
                "Check-out must be after check-in".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CalendarError::DateParseError {
            value: "2024-13-01".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date '2024-13-01', expected YYYY-MM-DD");

        let err = CalendarError::InvalidRange {
            start: "2024-05-05".to_string(),
            end: "2024-05-03".to_string(),
        };
        assert!(err.to_string().contains("2024-05-03"));
        assert_eq!(err.user_friendly_message(), "Check-out must be after check-in");
    }
}
