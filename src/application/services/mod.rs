//! Application services.

mod hours_summary;

pub use hours_summary::{HoursSummary, IsoWeek};
