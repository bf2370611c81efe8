use super::{Collection, KeyValueStore, load_list, save_value};
use crate::error::AppError;
use crate::models::Zone;

pub fn all<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<Zone>, AppError> {
    load_list(store, Collection::Zones)
}

pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, zone: &Zone) -> Result<(), AppError> {
    let mut zones = all(store)?;
    zones.push(zone.clone());
    save_value(store, Collection::Zones, &zones)
}

pub fn by_id<S: KeyValueStore + ?Sized>(store: &S, id: &str) -> Result<Option<Zone>, AppError> {
    Ok(all(store)?.into_iter().find(|z| z.id == id))
}

/// Replace the zone with the same id. False if there is none.
pub fn update<S: KeyValueStore + ?Sized>(store: &mut S, zone: &Zone) -> Result<bool, AppError> {
    let mut zones = all(store)?;
    let Some(slot) = zones.iter_mut().find(|z| z.id == zone.id) else {
        return Ok(false);
    };
    *slot = zone.clone();
    save_value(store, Collection::Zones, &zones)?;
    Ok(true)
}

pub fn delete<S: KeyValueStore + ?Sized>(store: &mut S, id: &str) -> Result<bool, AppError> {
    let mut zones = all(store)?;
    let before = zones.len();
    zones.retain(|z| z.id != id);
    save_value(store, Collection::Zones, &zones)?;
    Ok(zones.len() != before)
}
