use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use nutrient_rs::catalog;
use nutrient_rs::models::{MassUnit, ZoneKind, new_id};
use nutrient_rs::storage::{self, inventory, recipes, reminders, watering, zones};
use nutrient_rs::{
    FileStore, GrowingSystem, InventoryItem, KeyValueStore, MemoryStore, Phase, ReminderSettings,
    SavedRecipe, VolumeUnit, WateringRecord, Zone, estimated_ec, solve,
};
use tempfile::tempdir;

fn item(salt_id: &str, stock: f64, unit: MassUnit, cost_per_kg: f64) -> InventoryItem {
    InventoryItem {
        salt_id: salt_id.to_string(),
        stock,
        unit,
        location: "cabinet".to_string(),
        cost_per_kg,
        currency: "EUR".to_string(),
        last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        notes: None,
    }
}

fn recipe(name: &str) -> SavedRecipe {
    let target = catalog::target_for(Phase::FloweringT1, GrowingSystem::Coco)
        .unwrap()
        .ppm;
    let salts = catalog::salts_by_ids(&["potassium_nitrate", "mkp", "magnesium_sulfate"]).unwrap();
    let results = solve(&target, &salts, 20.0);
    SavedRecipe {
        id: new_id(),
        name: name.to_string(),
        notes: String::new(),
        created_at: Utc::now(),
        phase: Phase::FloweringT1,
        system: GrowingSystem::Coco,
        volume: 20.0,
        unit: VolumeUnit::Liters,
        target_ppm: target,
        estimated_ec: estimated_ec(&results, 20.0),
        results,
    }
}

fn watering_on(date: NaiveDate) -> WateringRecord {
    WateringRecord {
        id: new_id(),
        date,
        ec: 1.6,
        ph: 5.9,
        drainage: 20.0,
        observations: "fine".to_string(),
        recipe_id: None,
        recipe_name: None,
        volume_liters: 3.0,
        phase: Phase::Vegetative,
        system: GrowingSystem::Coco,
        zone_id: None,
        zone_name: None,
    }
}

#[test]
fn recipes_survive_a_new_store_handle() {
    let dir = tempdir().unwrap();
    let saved = recipe("bloom week 2");
    {
        let mut store = FileStore::new(dir.path());
        recipes::save(&mut store, &saved).unwrap();
    }
    let store = FileStore::new(dir.path());
    assert!(dir.path().join("recipes.json").exists());
    let loaded = recipes::by_id(&store, &saved.id).unwrap().unwrap();
    assert_eq!(loaded.name, "bloom week 2");
    assert_eq!(loaded.created_at, saved.created_at);
    let ids = |r: &SavedRecipe| r.results.iter().map(|d| d.salt.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&loaded), ids(&saved));
    for (a, b) in loaded.results.iter().zip(&saved.results) {
        assert!((a.grams - b.grams).abs() < 1e-9);
    }
}

#[test]
fn recipe_keeps_salt_values_not_references() {
    let mut store = MemoryStore::default();
    let saved = recipe("frozen");
    recipes::save(&mut store, &saved).unwrap();

    let loaded = recipes::by_id(&store, &saved.id).unwrap().unwrap();
    let mkp = loaded
        .results
        .iter()
        .find(|r| r.salt.id == "mkp")
        .unwrap();
    assert_eq!(mkp.salt.provides["P"], 22.76);
    assert_eq!(mkp.salt.purity, Some(98.0));
}

#[test]
fn recipe_delete_reports_whether_anything_went() {
    let mut store = MemoryStore::default();
    let saved = recipe("short lived");
    recipes::save(&mut store, &saved).unwrap();
    assert!(recipes::delete(&mut store, &saved.id).unwrap());
    assert!(!recipes::delete(&mut store, &saved.id).unwrap());
    assert!(recipes::all(&store).unwrap().is_empty());
}

#[test]
fn inventory_upsert_keeps_one_record_per_salt() {
    let mut store = MemoryStore::default();
    inventory::upsert(&mut store, &item("mkp", 500.0, MassUnit::G, 6.0)).unwrap();
    inventory::upsert(&mut store, &item("mkp", 2.0, MassUnit::Kg, 6.0)).unwrap();
    inventory::upsert(&mut store, &item("boric_acid", 100.0, MassUnit::G, 10.0)).unwrap();

    let items = inventory::all(&store).unwrap();
    assert_eq!(items.len(), 2);
    let mkp = inventory::by_salt_id(&store, "mkp").unwrap().unwrap();
    assert_eq!(mkp.unit, MassUnit::Kg);
    // 2 kg * 6 + 0.1 kg * 10
    assert!((inventory::total_value(&items) - 13.0).abs() < 1e-12);
}

#[test]
fn deducting_kg_stock_converts_through_grams() {
    let mut store = MemoryStore::default();
    inventory::upsert(&mut store, &item("mkp", 2.0, MassUnit::Kg, 6.0)).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    assert!(inventory::deduct_stock(&mut store, "mkp", 500.0, now).unwrap());
    let mkp = inventory::by_salt_id(&store, "mkp").unwrap().unwrap();
    assert_eq!(mkp.stock, 1.5);
    assert_eq!(mkp.last_updated, now);
}

#[test]
fn deducting_too_much_changes_nothing() {
    let mut store = MemoryStore::default();
    inventory::upsert(&mut store, &item("mkp", 100.0, MassUnit::G, 6.0)).unwrap();
    let now = Utc::now();

    assert!(!inventory::deduct_stock(&mut store, "mkp", 100.5, now).unwrap());
    assert!(!inventory::deduct_stock(&mut store, "missing", 1.0, now).unwrap());
    assert_eq!(
        inventory::by_salt_id(&store, "mkp").unwrap().unwrap().stock,
        100.0
    );

    assert!(inventory::update_stock(&mut store, "mkp", 40.0, now).unwrap());
    assert_eq!(inventory::by_salt_id(&store, "mkp").unwrap().unwrap().stock, 40.0);
    assert!(inventory::delete(&mut store, "mkp").unwrap());
    assert!(!inventory::update_stock(&mut store, "mkp", 1.0, now).unwrap());
}

#[test]
fn watering_history_filters_by_inclusive_range() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    for d in [1, 5, 10, 15] {
        let date = NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        watering::save(&mut store, &watering_on(date)).unwrap();
    }
    let hits = watering::in_date_range(
        &store,
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
    )
    .unwrap();
    let days: Vec<_> = hits.iter().map(|r| r.date.format("%d").to_string()).collect();
    assert_eq!(days, ["05", "10"]);

    let first = watering::all(&store).unwrap()[0].id.clone();
    assert!(watering::delete(&mut store, &first).unwrap());
    assert_eq!(watering::all(&store).unwrap().len(), 3);
}

#[test]
fn zones_update_in_place() {
    let mut store = MemoryStore::default();
    let zone = Zone {
        id: new_id(),
        name: "Tent A".to_string(),
        kind: ZoneKind::Zone,
        description: None,
        created_at: Utc::now(),
    };
    zones::save(&mut store, &zone).unwrap();

    let renamed = Zone {
        name: "Tent A (veg)".to_string(),
        ..zone.clone()
    };
    assert!(zones::update(&mut store, &renamed).unwrap());
    assert_eq!(zones::by_id(&store, &zone.id).unwrap().unwrap().name, "Tent A (veg)");
    assert_eq!(zones::all(&store).unwrap().len(), 1);

    let stranger = Zone {
        id: new_id(),
        ..zone
    };
    assert!(!zones::update(&mut store, &stranger).unwrap());
}

#[test]
fn reminder_settings_round_trip_and_clear() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::new(dir.path());
    assert_eq!(reminders::load(&store).unwrap(), None);

    let settings = ReminderSettings {
        days_interval: 3,
        phase: Phase::Flush,
        ..ReminderSettings::default()
    };
    reminders::save(&mut store, &settings).unwrap();
    assert_eq!(reminders::load(&store).unwrap(), Some(settings));

    reminders::clear(&mut store).unwrap();
    assert_eq!(reminders::load(&store).unwrap(), None);
    // Clearing twice is fine.
    reminders::clear(&mut store).unwrap();
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced_on_write() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("inventory.json"), "[{\"salt_id\":").unwrap();

    let mut store = FileStore::new(dir.path());
    assert!(inventory::all(&store).unwrap().is_empty());

    inventory::upsert(&mut store, &item("map", 250.0, MassUnit::G, 3.0)).unwrap();
    assert_eq!(inventory::all(&store).unwrap().len(), 1);
    assert!(!dir.path().join("inventory.json.tmp").exists());
}

#[test]
fn reading_a_fresh_directory_creates_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("not-yet");
    let store = FileStore::new(&root);
    assert!(zones::all(&store).unwrap().is_empty());
    assert_eq!(store.read("zones").unwrap(), None);
    assert!(!root.exists());
    assert_eq!(store.root_dir(), root.as_path());
}

#[test]
fn collections_live_under_their_own_keys() {
    let mut store = MemoryStore::default();
    inventory::upsert(&mut store, &item("mkp", 1.0, MassUnit::G, 1.0)).unwrap();
    for collection in storage::Collection::ALL {
        let present = store.read(collection.key()).unwrap().is_some();
        assert_eq!(present, collection.key() == "inventory");
    }
}
