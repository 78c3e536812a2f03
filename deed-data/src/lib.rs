//! Published circle-rate schedules.

mod schedule;

pub use schedule::{CircleRateLoadError, CircleRateRecord, CircleRateSchedule};
