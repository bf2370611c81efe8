use super::{Collection, KeyValueStore, load_value, save_value};
use crate::error::AppError;
use crate::models::ReminderSettings;

pub fn save<S: KeyValueStore + ?Sized>(
    store: &mut S,
    settings: &ReminderSettings,
) -> Result<(), AppError> {
    save_value(store, Collection::ReminderSettings, settings)
}

/// Stored settings, or `None` when unset or unreadable.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<ReminderSettings>, AppError> {
    load_value(store, Collection::ReminderSettings)
}

pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), AppError> {
    store.remove(Collection::ReminderSettings.key())
}
