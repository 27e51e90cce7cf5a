use crate::domain::model::{
    DateValue, DisabledDateSet, FieldId, InvalidationPolicy, MinDate, PickerOptions,
    RangeSelection,
};
use crate::domain::ports::{DatePicker, PickerBackend};
use crate::utils::error::Result;

/// Keeps the end picker's lower bound on the chosen start date and drops an
/// end selection the new start invalidates.
///
/// Both pickers are owned here, so the start-change handler reaches the end
/// picker directly. The end picker is bound first.
#[derive(Debug)]
pub struct RangeConstraintController<P: DatePicker> {
    start: P,
    end: P,
    disabled: DisabledDateSet,
    policy: InvalidationPolicy,
}

impl<P: DatePicker> RangeConstraintController<P> {
    /// Binds pickers to both fields. Returns `None` when either field is
    /// missing from the page.
    pub fn attach<B>(
        backend: &B,
        start_field: Option<&FieldId>,
        end_field: Option<&FieldId>,
        template: &PickerOptions,
        disabled: DisabledDateSet,
        policy: InvalidationPolicy,
    ) -> Option<Self>
    where
        B: PickerBackend<Picker = P>,
    {
        let (start_field, end_field) = match (start_field, end_field) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                tracing::debug!("Range fields not found, range constraint not attached");
                return None;
            }
        };

        let options = PickerOptions {
            min_date: MinDate::Today,
            ..template.clone()
        }
        .with_disabled(disabled.clone());

        let end = backend.attach(end_field, options.clone());
        let start = backend.attach(start_field, options);

        tracing::debug!(
            "Range constraint attached to {} -> {} ({} disabled dates, {:?})",
            start_field,
            end_field,
            disabled.len(),
            policy
        );

        Some(Self::from_pickers(start, end, disabled, policy))
    }

    pub fn from_pickers(
        start: P,
        end: P,
        disabled: DisabledDateSet,
        policy: InvalidationPolicy,
    ) -> Self {
        Self {
            start,
            end,
            disabled,
            policy,
        }
    }

    /// Change handler of the start picker. An empty selection (the field was
    /// cleared) leaves the end picker alone.
    pub fn on_start_change(&mut self, selected: &[DateValue]) {
        let Some(start) = selected.first().copied() else {
            return;
        };

        self.end.set_min_date(start);

        if let Some(end) = self.end.selected() {
            if self.policy.invalidates(&end, &start, &self.disabled) {
                tracing::debug!("Clearing end date {} after start moved to {}", end, start);
                self.end.clear();
            }
        }
    }

    pub fn select_start(&mut self, date: DateValue) -> Result<()> {
        self.start.select(date)?;
        let selected = self.start.selected_dates().to_vec();
        self.on_start_change(&selected);
        Ok(())
    }

    pub fn select_end(&mut self, date: DateValue) -> Result<()> {
        self.end.select(date)
    }

    pub fn clear_start(&mut self) {
        self.start.clear();
        self.on_start_change(&[]);
    }

    pub fn selection(&self) -> RangeSelection {
        RangeSelection {
            start: self.start.selected(),
            end: self.end.selected(),
        }
    }

    pub fn start(&self) -> &P {
        &self.start
    }

    pub fn end(&self) -> &P {
        &self.end
    }

    pub fn disabled_dates(&self) -> &DisabledDateSet {
        &self.disabled
    }

    pub fn policy(&self) -> InvalidationPolicy {
        self.policy
    }
}
