//! Rules applied to the watering log: reading checks, reminder scheduling
//! and history statistics.

pub mod reminders;
pub mod stats;
pub mod validation;

pub use reminders::{ReminderSchedule, next_watering, phase_interval_recommendation};
pub use stats::{HistoryStats, Trend, history_stats};
pub use validation::{ReadingStatus, ReadingValidation, validate_reading};
