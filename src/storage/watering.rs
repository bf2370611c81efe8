use chrono::NaiveDate;
use tracing::info;

use super::{Collection, KeyValueStore, load_list, save_value};
use crate::error::AppError;
use crate::models::WateringRecord;

pub fn all<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<WateringRecord>, AppError> {
    load_list(store, Collection::WateringHistory)
}

pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &WateringRecord,
) -> Result<(), AppError> {
    let mut history = all(store)?;
    history.push(record.clone());
    save_value(store, Collection::WateringHistory, &history)?;
    info!(id = %record.id, date = %record.date, "logged watering");
    Ok(())
}

pub fn delete<S: KeyValueStore + ?Sized>(store: &mut S, id: &str) -> Result<bool, AppError> {
    let mut history = all(store)?;
    let before = history.len();
    history.retain(|r| r.id != id);
    save_value(store, Collection::WateringHistory, &history)?;
    Ok(history.len() != before)
}

/// Records dated within `[start, end]`, in stored order.
pub fn in_date_range<S: KeyValueStore + ?Sized>(
    store: &S,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<WateringRecord>, AppError> {
    Ok(all(store)?
        .into_iter()
        .filter(|r| r.date >= start && r.date <= end)
        .collect())
}
