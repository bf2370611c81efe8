use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{Phase, WateringRecord};

/// Drainage this far (percentage points) from target shifts the interval by a day.
pub const DRAINAGE_TOLERANCE: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReminderSchedule {
    pub next_watering_date: NaiveDate,
    /// Negative when overdue.
    pub days_until_next: i64,
    pub should_notify: bool,
    pub message: String,
}

/// Work out the next watering day from the most recent record.
///
/// Low drainage (below target by more than 10 points) brings the next
/// watering a day earlier, never below a one-day interval; high drainage
/// pushes it a day later. Without any record watering is due `today`.
pub fn next_watering(
    last: Option<&WateringRecord>,
    base_interval_days: u32,
    target_drainage: f64,
    today: NaiveDate,
) -> ReminderSchedule {
    let Some(last) = last else {
        return ReminderSchedule {
            next_watering_date: today,
            days_until_next: 0,
            should_notify: true,
            message: "No watering records yet. Time to log your first watering.".to_string(),
        };
    };

    let days_since = (today - last.date).num_days();

    let interval = if last.drainage < target_drainage - DRAINAGE_TOLERANCE {
        base_interval_days.saturating_sub(1).max(1)
    } else if last.drainage > target_drainage + DRAINAGE_TOLERANCE {
        base_interval_days.saturating_add(1)
    } else {
        base_interval_days
    };

    let next = last
        .date
        .checked_add_days(Days::new(u64::from(interval)))
        .unwrap_or(NaiveDate::MAX);
    let days_until_next = (next - today).num_days();

    let (should_notify, message) = match days_until_next {
        d if d <= 0 => (
            true,
            format!(
                "Time to water. Last watering {days_since} days ago with {}% drainage.",
                last.drainage
            ),
        ),
        1 => (
            true,
            format!(
                "Next watering tomorrow. Last drainage: {}% (target: {target_drainage}%).",
                last.drainage
            ),
        ),
        d => (
            false,
            format!(
                "Next watering in {d} days. Last drainage: {}%.",
                last.drainage
            ),
        ),
    };

    ReminderSchedule {
        next_watering_date: next,
        days_until_next,
        should_notify,
        message,
    }
}

/// Suggested base interval in days for a phase.
pub fn phase_interval_recommendation(phase: Phase) -> u32 {
    match phase {
        Phase::Flush => 3,
        _ => 2,
    }
}

/// Most recent record by date; later entries win ties.
pub fn latest_record(records: &[WateringRecord]) -> Option<&WateringRecord> {
    records.iter().max_by_key(|r| r.date)
}
