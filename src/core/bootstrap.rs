use crate::core::availability::AvailabilityWindow;
use crate::core::controller::RangeConstraintController;
use crate::domain::model::{DateValue, DisabledDateSet, InvalidationPolicy, MinDate, PickerOptions};
use crate::domain::ports::{AvailabilitySource, DatePicker, FormPage, PickerBackend};

/// Everything bound on the page after load.
#[derive(Debug)]
pub struct PageCalendars<P: DatePicker> {
    pub plain: Vec<P>,
    pub range: Option<RangeConstraintController<P>>,
    /// Whether the disabled dates came from the availability source.
    pub disabled_dates_loaded: bool,
}

impl<P: DatePicker> Default for PageCalendars<P> {
    fn default() -> Self {
        Self {
            plain: Vec::new(),
            range: None,
            disabled_dates_loaded: false,
        }
    }
}

/// Page-load initialization of the booking form.
#[derive(Debug, Clone)]
pub struct CalendarBootstrap {
    today: DateValue,
    picker: PickerOptions,
    policy: InvalidationPolicy,
    window_months: u32,
}

impl CalendarBootstrap {
    pub fn new(today: DateValue) -> Self {
        Self {
            today,
            picker: PickerOptions::default(),
            policy: InvalidationPolicy::default(),
            window_months: crate::core::availability::DEFAULT_WINDOW_MONTHS,
        }
    }

    pub fn with_picker_options(mut self, picker: PickerOptions) -> Self {
        self.picker = picker;
        self
    }

    pub fn with_policy(mut self, policy: InvalidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_window_months(mut self, months: u32) -> Self {
        self.window_months = months;
        self
    }

    /// Binds pickers, loads disabled dates and wires the range constraint.
    /// Nothing here fails: missing markup skips a branch and a failed fetch
    /// leaves the disabled set empty.
    pub async fn initialize<F, B>(
        &self,
        page: &mut F,
        backend: Option<&B>,
        source: Option<&dyn AvailabilitySource>,
    ) -> PageCalendars<B::Picker>
    where
        F: FormPage,
        B: PickerBackend,
    {
        let mut calendars = PageCalendars::default();

        if let Some(backend) = backend {
            calendars.plain = self.attach_plain(page, backend);

            let start_field = page.range_start();
            let end_field = page.range_end();

            if start_field.is_some() && end_field.is_some() {
                let room_id = start_field.as_ref().and_then(|f| page.room_id(f));
                let disabled = match (room_id, source) {
                    (Some(room_id), Some(source)) => {
                        let loaded = self.load_disabled_dates(source, &room_id).await;
                        calendars.disabled_dates_loaded = loaded.is_some();
                        loaded.unwrap_or_default()
                    }
                    (None, _) => {
                        tracing::debug!("Range start has no room id, skipping availability");
                        DisabledDateSet::empty()
                    }
                    (_, None) => {
                        tracing::debug!("No availability source, skipping availability");
                        DisabledDateSet::empty()
                    }
                };

                calendars.range = RangeConstraintController::attach(
                    backend,
                    start_field.as_ref(),
                    end_field.as_ref(),
                    &self.picker,
                    disabled,
                    self.policy,
                );
            } else {
                tracing::debug!("Range fields not found, skipping range constraint");
            }
        } else {
            tracing::debug!("No date picker backend available, calendars disabled");
        }

        focus_first(page);
        calendars
    }

    fn attach_plain<F, B>(&self, page: &F, backend: &B) -> Vec<B::Picker>
    where
        F: FormPage,
        B: PickerBackend,
    {
        let options = PickerOptions {
            min_date: MinDate::Today,
            disabled: DisabledDateSet::empty(),
            ..self.picker.clone()
        }
        .with_allow_input(true);

        page.date_inputs()
            .iter()
            .map(|field| backend.attach(field, options.clone()))
            .collect()
    }

    async fn load_disabled_dates(
        &self,
        source: &dyn AvailabilitySource,
        room_id: &str,
    ) -> Option<DisabledDateSet> {
        let window = AvailabilityWindow::spanning(self.today, self.window_months);
        match source.disabled_dates(room_id, window.start, window.end).await {
            Ok(set) => {
                tracing::debug!("Loaded {} disabled dates for room {}", set.len(), room_id);
                Some(set)
            }
            Err(e) => {
                tracing::debug!("Availability for room {} unavailable: {}", room_id, e);
                None
            }
        }
    }
}

fn focus_first<F: FormPage>(page: &mut F) {
    if let Some(field) = page.auto_focus_fields().into_iter().next() {
        page.focus(&field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FieldSpec, MemoryBackend, StaticPage};
    use crate::domain::model::FieldId;
    use crate::utils::error::{CalendarError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn d(s: &str) -> DateValue {
        s.parse().unwrap()
    }

    struct FixedSource {
        result: std::result::Result<Vec<&'static str>, ()>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn ok(dates: Vec<&'static str>) -> Self {
            Self {
                result: Ok(dates),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl AvailabilitySource for FixedSource {
        async fn disabled_dates(
            &self,
            _room_id: &str,
            _start: DateValue,
            _end: DateValue,
        ) -> Result<DisabledDateSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(dates) => DisabledDateSet::from_iso_strings(dates.iter().copied()),
                Err(()) => Err(CalendarError::ApiStatus {
                    status: 503,
                    url: "http://test/api".to_string(),
                }),
            }
        }
    }

    fn booking_page(room_id: Option<&str>) -> StaticPage {
        let mut start = FieldSpec::new("check_in").attr("data-range-start", "");
        if let Some(room_id) = room_id {
            start = start.attr("data-room-id", room_id);
        }
        StaticPage::new(vec![
            FieldSpec::new("birthday").class("date-input"),
            start,
            FieldSpec::new("check_out")
                .attr("data-range-end", "")
                .class("auto-focus"),
            FieldSpec::new("notes").class("auto-focus"),
        ])
    }

    #[tokio::test]
    async fn test_full_initialization() {
        let mut page = booking_page(Some("9"));
        let backend = MemoryBackend::new(d("2024-04-01"));
        let source = FixedSource::ok(vec!["2024-06-10"]);

        let calendars = CalendarBootstrap::new(d("2024-04-01"))
            .initialize(&mut page, Some(&backend), Some(&source as &dyn AvailabilitySource))
            .await;

        assert_eq!(calendars.plain.len(), 1);
        assert!(calendars.plain[0].options().allow_input);
        assert!(calendars.disabled_dates_loaded);

        let range = calendars.range.unwrap();
        assert!(range.disabled_dates().contains(&d("2024-06-10")));
        assert_eq!(range.end().min_date(), Some(d("2024-04-01")));
        assert_eq!(page.focused(), Some(&FieldId::new("check_out")));
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_empty_set() {
        let mut page = booking_page(Some("9"));
        let backend = MemoryBackend::new(d("2024-04-01"));
        let source = FixedSource::failing();

        let calendars = CalendarBootstrap::new(d("2024-04-01"))
            .initialize(&mut page, Some(&backend), Some(&source as &dyn AvailabilitySource))
            .await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(!calendars.disabled_dates_loaded);
        let range = calendars.range.unwrap();
        assert!(range.disabled_dates().is_empty());
        assert_eq!(range.start().min_date(), Some(d("2024-04-01")));
        assert_eq!(range.end().min_date(), Some(d("2024-04-01")));
    }

    #[tokio::test]
    async fn test_missing_room_id_skips_fetch() {
        let mut page = booking_page(None);
        let backend = MemoryBackend::new(d("2024-04-01"));
        let source = FixedSource::ok(vec!["2024-06-10"]);

        let calendars = CalendarBootstrap::new(d("2024-04-01"))
            .initialize(&mut page, Some(&backend), Some(&source as &dyn AvailabilitySource))
            .await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(calendars.range.unwrap().disabled_dates().is_empty());
    }

    #[tokio::test]
    async fn test_missing_end_field_keeps_plain_pickers() {
        let mut page = StaticPage::new(vec![
            FieldSpec::new("birthday").class("date-input"),
            FieldSpec::new("check_in")
                .attr("data-range-start", "")
                .attr("data-room-id", "9"),
        ]);
        let backend = MemoryBackend::new(d("2024-04-01"));
        let source = FixedSource::ok(vec![]);

        let calendars = CalendarBootstrap::new(d("2024-04-01"))
            .initialize(&mut page, Some(&backend), Some(&source as &dyn AvailabilitySource))
            .await;

        assert_eq!(calendars.plain.len(), 1);
        assert!(calendars.range.is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_without_backend_only_focus_runs() {
        let mut page = booking_page(Some("9"));
        let source = FixedSource::ok(vec![]);

        let calendars = tokio_test::block_on(
            CalendarBootstrap::new(d("2024-04-01")).initialize::<_, MemoryBackend>(
                &mut page,
                None,
                Some(&source as &dyn AvailabilitySource),
            ),
        );

        assert!(calendars.plain.is_empty());
        assert!(calendars.range.is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(page.focused(), Some(&FieldId::new("check_out")));
    }
}
