use chrono::{DateTime, Utc};
use tracing::info;

use super::{Collection, KeyValueStore, load_list, save_value};
use crate::error::AppError;
use crate::models::InventoryItem;

pub fn all<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<InventoryItem>, AppError> {
    load_list(store, Collection::Inventory)
}

/// Insert or replace the record for `item.salt_id`.
pub fn upsert<S: KeyValueStore + ?Sized>(
    store: &mut S,
    item: &InventoryItem,
) -> Result<(), AppError> {
    let mut items = all(store)?;
    match items.iter_mut().find(|i| i.salt_id == item.salt_id) {
        Some(existing) => *existing = item.clone(),
        None => items.push(item.clone()),
    }
    save_value(store, Collection::Inventory, &items)?;
    info!(salt = %item.salt_id, stock = item.stock, "updated inventory");
    Ok(())
}

pub fn by_salt_id<S: KeyValueStore + ?Sized>(
    store: &S,
    salt_id: &str,
) -> Result<Option<InventoryItem>, AppError> {
    Ok(all(store)?.into_iter().find(|i| i.salt_id == salt_id))
}

pub fn delete<S: KeyValueStore + ?Sized>(store: &mut S, salt_id: &str) -> Result<bool, AppError> {
    let mut items = all(store)?;
    let before = items.len();
    items.retain(|i| i.salt_id != salt_id);
    save_value(store, Collection::Inventory, &items)?;
    Ok(items.len() != before)
}

/// Overwrite the stock figure (in the item's own unit). False if no record.
pub fn update_stock<S: KeyValueStore + ?Sized>(
    store: &mut S,
    salt_id: &str,
    new_stock: f64,
    now: DateTime<Utc>,
) -> Result<bool, AppError> {
    let mut items = all(store)?;
    let Some(item) = items.iter_mut().find(|i| i.salt_id == salt_id) else {
        return Ok(false);
    };
    item.stock = new_stock;
    item.last_updated = now;
    save_value(store, Collection::Inventory, &items)?;
    Ok(true)
}

/// Take `grams_used` out of stock.
///
/// Returns false, leaving the store untouched, when the salt has no record or
/// not enough stock.
pub fn deduct_stock<S: KeyValueStore + ?Sized>(
    store: &mut S,
    salt_id: &str,
    grams_used: f64,
    now: DateTime<Utc>,
) -> Result<bool, AppError> {
    let mut items = all(store)?;
    let Some(item) = items.iter_mut().find(|i| i.salt_id == salt_id) else {
        return Ok(false);
    };

    let stock_grams = item.stock_grams();
    if stock_grams < grams_used {
        return Ok(false);
    }
    item.stock = item.unit.grams_in_unit(stock_grams - grams_used);
    item.last_updated = now;
    save_value(store, Collection::Inventory, &items)?;
    info!(salt = %salt_id, grams_used, "deducted stock");
    Ok(true)
}

/// Value of everything on hand: stock in kg times cost per kg.
pub fn total_value(items: &[InventoryItem]) -> f64 {
    items.iter().map(InventoryItem::value).sum()
}
