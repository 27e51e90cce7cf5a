use crate::domain::model::{DateValue, DisabledDateSet};
use crate::domain::ports::AvailabilitySource;
use crate::utils::error::{CalendarError, Result};
use chrono::Months;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// Date span the availability request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub start: DateValue,
    pub end: DateValue,
}

impl AvailabilityWindow {
    pub fn from_today(today: DateValue) -> Self {
        Self::spanning(today, DEFAULT_WINDOW_MONTHS)
    }

    /// `[today, today + months]`. Month ends are clamped, so Feb 29 plus a
    /// year is Feb 28.
    pub fn spanning(today: DateValue, months: u32) -> Self {
        let end = today
            .naive()
            .checked_add_months(Months::new(months))
            .map(DateValue::new)
            .unwrap_or(today);
        Self { start: today, end }
    }
}

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    disabled_dates: Vec<String>,
}

/// Reads `/api/rooms/{room}/availability/` from the booking API.
#[derive(Debug, Clone)]
pub struct HttpAvailabilitySource {
    client: Client,
    base_url: Url,
}

impl HttpAvailabilitySource {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CalendarError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        Ok(Self { client, base_url })
    }

    pub fn availability_url(&self, room_id: &str, start: DateValue, end: DateValue) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CalendarError::ConfigError {
                message: format!("Base URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(["api", "rooms", room_id, "availability", ""]);
        url.query_pairs_mut()
            .append_pair("start_date", &start.to_string())
            .append_pair("end_date", &end.to_string());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl AvailabilitySource for HttpAvailabilitySource {
    async fn disabled_dates(
        &self,
        room_id: &str,
        start: DateValue,
        end: DateValue,
    ) -> Result<DisabledDateSet> {
        let url = self.availability_url(room_id, start, end)?;

        tracing::debug!("Making availability request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("Availability response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CalendarError::ApiStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let payload: AvailabilityResponse = serde_json::from_str(&body)?;
        DisabledDateSet::from_iso_strings(&payload.disabled_dates)
    }
}
