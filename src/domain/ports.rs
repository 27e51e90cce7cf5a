use crate::domain::model::{DateValue, DisabledDateSet, FieldId, PickerOptions};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A calendar widget bound to one input field.
pub trait DatePicker {
    fn set_min_date(&mut self, date: DateValue);
    fn min_date(&self) -> Option<DateValue>;
    fn selected_dates(&self) -> &[DateValue];
    /// User selection. Fails for dates the widget marks unselectable.
    fn select(&mut self, date: DateValue) -> Result<()>;
    fn clear(&mut self);

    fn selected(&self) -> Option<DateValue> {
        self.selected_dates().first().copied()
    }
}

/// The widget library: creates pickers bound to page fields.
pub trait PickerBackend {
    type Picker: DatePicker;

    fn attach(&self, field: &FieldId, options: PickerOptions) -> Self::Picker;
}

/// The markup contract of the booking form.
pub trait FormPage {
    /// Plain date inputs, in document order.
    fn date_inputs(&self) -> Vec<FieldId>;
    fn range_start(&self) -> Option<FieldId>;
    fn range_end(&self) -> Option<FieldId>;
    fn room_id(&self, field: &FieldId) -> Option<String>;
    /// Fields marked for auto-focus, in document order.
    fn auto_focus_fields(&self) -> Vec<FieldId>;
    fn focus(&mut self, field: &FieldId);
}

#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn disabled_dates(
        &self,
        room_id: &str,
        start: DateValue,
        end: DateValue,
    ) -> Result<DisabledDateSet>;
}
