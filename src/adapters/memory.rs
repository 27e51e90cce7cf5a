use crate::core::format::{format_date, parse_date};
use crate::domain::model::{DateValue, FieldId, PickerOptions};
use crate::domain::ports::{DatePicker, FormPage, PickerBackend};
use crate::utils::error::{CalendarError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DATE_INPUT_CLASS: &str = "date-input";
pub const AUTO_FOCUS_CLASS: &str = "auto-focus";
pub const RANGE_START_ATTR: &str = "data-range-start";
pub const RANGE_END_ATTR: &str = "data-range-end";
pub const ROOM_ID_ATTR: &str = "data-room-id";

/// Headless picker: keeps the selection and enforces the same
/// selectability rules a rendered calendar would.
#[derive(Debug, Clone)]
pub struct MemoryPicker {
    field: FieldId,
    options: PickerOptions,
    min_date: DateValue,
    selected: Vec<DateValue>,
}

impl MemoryPicker {
    pub fn new(field: FieldId, options: PickerOptions, today: DateValue) -> Self {
        let min_date = options.min_date.resolve(today);
        Self {
            field,
            options,
            min_date,
            selected: Vec::new(),
        }
    }

    pub fn field(&self) -> &FieldId {
        &self.field
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// Value submitted with the form, in the storage format.
    pub fn value(&self) -> String {
        self.selected()
            .map(|date| format_date(&date, &self.options.date_format))
            .unwrap_or_default()
    }

    /// Value shown to the user. Falls back to the storage format when the
    /// alternate input is off.
    pub fn display_value(&self) -> String {
        let format = if self.options.alt_input {
            &self.options.alt_format
        } else {
            &self.options.date_format
        };
        self.selected()
            .map(|date| format_date(&date, format))
            .unwrap_or_default()
    }

    /// Typed input in the storage format. Only accepted when `allow_input`
    /// is set.
    pub fn input(&mut self, text: &str) -> Result<()> {
        if !self.options.allow_input {
            return Err(CalendarError::Unselectable {
                date: text.to_string(),
                reason: format!("field {} does not accept typed input", self.field),
            });
        }
        if text.trim().is_empty() {
            self.clear();
            return Ok(());
        }
        let date = parse_date(text, &self.options.date_format)?;
        self.select(date)
    }
}

impl DatePicker for MemoryPicker {
    fn set_min_date(&mut self, date: DateValue) {
        self.min_date = date;
    }

    fn min_date(&self) -> Option<DateValue> {
        Some(self.min_date)
    }

    fn selected_dates(&self) -> &[DateValue] {
        &self.selected
    }

    fn select(&mut self, date: DateValue) -> Result<()> {
        if self.options.disabled.contains(&date) {
            return Err(CalendarError::Unselectable {
                date: date.to_string(),
                reason: "date is not available".to_string(),
            });
        }
        if date < self.min_date {
            return Err(CalendarError::Unselectable {
                date: date.to_string(),
                reason: format!("earliest selectable date is {}", self.min_date),
            });
        }
        self.selected = vec![date];
        Ok(())
    }

    fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Creates [`MemoryPicker`]s, resolving "today" to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct MemoryBackend {
    today: DateValue,
}

impl MemoryBackend {
    pub fn new(today: DateValue) -> Self {
        Self { today }
    }
}

impl PickerBackend for MemoryBackend {
    type Picker = MemoryPicker;

    fn attach(&self, field: &FieldId, options: PickerOptions) -> MemoryPicker {
        tracing::debug!("Binding picker to field {}", field);
        MemoryPicker::new(field.clone(), options, self.today)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// A form described as a list of fields in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPage {
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSpec>,
    #[serde(skip)]
    focused: Option<FieldId>,
}

impl StaticPage {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            focused: None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CalendarError::ConfigError {
            message: format!("Page description parsing error: {}", e),
        })
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn focused(&self) -> Option<&FieldId> {
        self.focused.as_ref()
    }

    fn find(&self, id: &FieldId) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id.as_str())
    }

    fn ids_where(&self, pred: impl Fn(&FieldSpec) -> bool) -> Vec<FieldId> {
        self.fields
            .iter()
            .filter(|&f| pred(f))
            .map(|f| FieldId::new(f.id.clone()))
            .collect()
    }
}

impl FormPage for StaticPage {
    fn date_inputs(&self) -> Vec<FieldId> {
        self.ids_where(|f| f.has_class(DATE_INPUT_CLASS))
    }

    fn range_start(&self) -> Option<FieldId> {
        self.ids_where(|f| f.has_attr(RANGE_START_ATTR)).into_iter().next()
    }

    fn range_end(&self) -> Option<FieldId> {
        self.ids_where(|f| f.has_attr(RANGE_END_ATTR)).into_iter().next()
    }

    fn room_id(&self, field: &FieldId) -> Option<String> {
        self.find(field)?
            .attributes
            .get(ROOM_ID_ATTR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn auto_focus_fields(&self) -> Vec<FieldId> {
        self.ids_where(|f| f.has_class(AUTO_FOCUS_CLASS))
    }

    fn focus(&mut self, field: &FieldId) {
        self.focused = Some(field.clone());
    }
}
