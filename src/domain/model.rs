use crate::utils::error::{CalendarError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// A calendar day without time, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateValue(NaiveDate);

impl DateValue {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for DateValue {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
            .map(Self)
            .map_err(|_| CalendarError::DateParseError {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for DateValue {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DateValue> for String {
    fn from(value: DateValue) -> Self {
        value.to_string()
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Dates a room cannot be booked on. Built once per page view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledDateSet(BTreeSet<DateValue>);

impl DisabledDateSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses every entry; a single bad date rejects the whole list.
    pub fn from_iso_strings<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|s| s.as_ref().parse::<DateValue>())
            .collect::<Result<BTreeSet<_>>>()
            .map(Self)
    }

    pub fn contains(&self, date: &DateValue) -> bool {
        self.0.contains(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateValue> {
        self.0.iter()
    }
}

impl FromIterator<DateValue> for DisabledDateSet {
    fn from_iter<T: IntoIterator<Item = DateValue>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The start/end pair as currently selected on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSelection {
    pub start: Option<DateValue>,
    pub end: Option<DateValue>,
}

impl RangeSelection {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// A complete selection must end strictly after it starts. Partial
    /// selections are accepted.
    pub fn validate(&self) -> Result<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end <= start => Err(CalendarError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn nights(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end > start => {
                Some((end.naive() - start.naive()).num_days())
            }
            _ => None,
        }
    }
}

/// When a new start date invalidates an already selected end date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidationPolicy {
    /// End is dropped if it is on or before the start, or disabled.
    #[default]
    InclusiveDisable,
    /// End is dropped only if it is a disabled date.
    DisabledOnly,
}

impl InvalidationPolicy {
    pub fn invalidates(
        &self,
        end: &DateValue,
        start: &DateValue,
        disabled: &DisabledDateSet,
    ) -> bool {
        match self {
            InvalidationPolicy::InclusiveDisable => end <= start || disabled.contains(end),
            InvalidationPolicy::DisabledOnly => disabled.contains(end),
        }
    }
}

impl FromStr for InvalidationPolicy {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inclusive-disable" => Ok(InvalidationPolicy::InclusiveDisable),
            "disabled-only" => Ok(InvalidationPolicy::DisabledOnly),
            other => Err(CalendarError::InvalidConfigValueError {
                field: "range.policy".to_string(),
                value: other.to_string(),
                reason: "Expected 'inclusive-disable' or 'disabled-only'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MinDate {
    #[default]
    Today,
    Date(DateValue),
}

impl MinDate {
    pub fn resolve(&self, today: DateValue) -> DateValue {
        match self {
            MinDate::Today => today,
            MinDate::Date(date) => *date,
        }
    }
}

/// Options handed to the picker backend when a field is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    pub date_format: String,
    pub alt_input: bool,
    pub alt_format: String,
    pub allow_input: bool,
    pub min_date: MinDate,
    pub disabled: DisabledDateSet,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            date_format: "Y-m-d".to_string(),
            alt_input: true,
            alt_format: "F j, Y".to_string(),
            allow_input: false,
            min_date: MinDate::Today,
            disabled: DisabledDateSet::empty(),
        }
    }
}

impl PickerOptions {
    pub fn with_disabled(mut self, disabled: DisabledDateSet) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_allow_input(mut self, allow_input: bool) -> Self {
        self.allow_input = allow_input;
        self
    }
}

/// Identifies a form field on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(pub String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
