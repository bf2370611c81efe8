//! Flat key-value persistence for the grow log.
//!
//! Each logical collection is one JSON document under a fixed key. Callers
//! pass the store explicitly; nothing here holds global state. Corrupt
//! documents read back as empty collections so one bad write never locks the
//! user out of the rest of their data.

pub mod file;
pub mod inventory;
pub mod memory;
pub mod recipes;
pub mod reminders;
pub mod watering;
pub mod zones;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AppError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// String values addressed by key.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, AppError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&mut self, key: &str) -> Result<(), AppError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Inventory,
    Recipes,
    WateringHistory,
    Zones,
    ReminderSettings,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Inventory,
        Collection::Recipes,
        Collection::WateringHistory,
        Collection::Zones,
        Collection::ReminderSettings,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Inventory => "inventory",
            Collection::Recipes => "recipes",
            Collection::WateringHistory => "watering_history",
            Collection::Zones => "zones",
            Collection::ReminderSettings => "watering_reminders",
        }
    }
}

/// Read a single JSON value. Missing or unparseable documents give `None`.
pub fn load_value<T, S>(store: &S, collection: Collection) -> Result<Option<T>, AppError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.read(collection.key())? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key = collection.key(), error = %e, "discarding corrupt stored data");
            Ok(None)
        }
    }
}

/// Read a list collection, degrading to empty on corrupt data.
pub fn load_list<T, S>(store: &S, collection: Collection) -> Result<Vec<T>, AppError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    Ok(load_value(store, collection)?.unwrap_or_default())
}

pub fn save_value<T, S>(store: &mut S, collection: Collection, value: &T) -> Result<(), AppError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| AppError::SerializeCollection {
        key: collection.key(),
        source,
    })?;
    store.write(collection.key(), &json)
}
