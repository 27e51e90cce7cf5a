pub mod availability;
pub mod bootstrap;
pub mod controller;
pub mod format;

pub use crate::domain::model::{DateValue, DisabledDateSet, InvalidationPolicy, RangeSelection};
pub use crate::domain::ports::{AvailabilitySource, DatePicker, FormPage, PickerBackend};
pub use crate::utils::error::Result;
