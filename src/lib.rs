pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::memory::{FieldSpec, MemoryBackend, MemoryPicker, StaticPage};
pub use config::CalendarConfig;
pub use crate::core::{
    availability::HttpAvailabilitySource, bootstrap::CalendarBootstrap,
    controller::RangeConstraintController,
};
pub use domain::model::{DateValue, DisabledDateSet, InvalidationPolicy, RangeSelection};
pub use utils::error::{CalendarError, Result};
