use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;

use crate::adapters::cli::{
    InventoryCommand, PhArgs, RecipeCommand, ReminderCommand, SolveArgs, VpdArgs,
    WateringCommand, ZoneCommand, parse_solve_request, validate_non_negative, validate_percent,
    validate_ph, validate_temperature, validate_volume,
};
use crate::catalog;
use crate::climate::vpd;
use crate::error::AppError;
use crate::models::{
    GrowingSystem, InventoryItem, ReminderSettings, SavedRecipe, WateringRecord, Zone, new_id,
};
use crate::nutrients::solver::{DosingSummary, compute_summary};
use crate::ph::adjustment::{PhAdjustmentParams, estimate};
use crate::storage::{self, KeyValueStore};
use crate::watering::{
    history_stats, next_watering, phase_interval_recommendation, reminders::latest_record,
    validate_reading,
};

pub struct Output {
    pub json: bool,
}

impl Output {
    /// Print `value` as JSON in `--json` mode, otherwise run `text`.
    fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce()) -> Result<(), AppError> {
        if self.json {
            let s = serde_json::to_string_pretty(value)
                .map_err(|source| AppError::SerializeOutput { source })?;
            println!("{}", s);
        } else {
            text();
        }
        Ok(())
    }

    /// Informational outcome that is not an error (nothing to compute).
    fn notice(&self, message: &str) -> Result<(), AppError> {
        self.emit(&serde_json::json!({ "notice": message }), || println!("{message}"))
    }
}

#[derive(Serialize)]
struct SolveOutput<'a> {
    #[serde(flatten)]
    summary: &'a DosingSummary,
    saved_recipe_id: Option<&'a str>,
}

pub fn solve<S: KeyValueStore>(
    args: &SolveArgs,
    store: &mut S,
    out: &Output,
) -> Result<(), AppError> {
    let req = parse_solve_request(args)?;

    let Some(target) = &req.target else {
        let phase = req.phase.map(|p| p.as_str()).unwrap_or("?");
        let system = req.system.map(GrowingSystem::as_str).unwrap_or("?");
        return out.notice(&format!(
            "No built-in target for phase '{phase}' in system '{system}'; pass --target-json"
        ));
    };
    if req.salts.is_empty() {
        return out.notice("No salts selected; pass --salts with at least one catalogue id");
    }

    let volume_liters = req.volume_liters();
    let summary = compute_summary(target, &req.salts, volume_liters);

    let saved_id = match (&args.save, req.phase, req.system) {
        (Some(name), Some(phase), Some(system)) => {
            let recipe = SavedRecipe {
                id: new_id(),
                name: name.clone(),
                notes: args.notes.clone(),
                created_at: Utc::now(),
                phase,
                system,
                volume: req.volume,
                unit: req.unit,
                target_ppm: target.clone(),
                results: summary.results.clone(),
                estimated_ec: summary.estimated_ec,
            };
            storage::recipes::save(store, &recipe)?;
            Some(recipe.id)
        }
        (Some(_), _, _) => {
            return Err(AppError::InvalidInput(
                "saving a recipe needs --phase and --system".to_string(),
            ));
        }
        (None, _, _) => None,
    };

    let payload = SolveOutput {
        summary: &summary,
        saved_recipe_id: saved_id.as_deref(),
    };
    out.emit(&payload, || {
        println!(
            "Solution for {:.2} {} ({:.2} L)",
            req.volume,
            req.unit.symbol(),
            volume_liters
        );
        if summary.results.is_empty() {
            println!("  No selected salt supplies any remaining nutrient.");
        }
        for r in &summary.results {
            println!("  {:<32} {:>10.3} g", r.salt.name, r.grams);
        }
        println!("Total salts:   {:.2} g", summary.total_grams);
        println!("Concentration: {:.2} g/L", summary.concentration_g_per_l);
        println!("Estimated EC:  {:.2} mS/cm", summary.estimated_ec);
        for b in &summary.balance {
            println!(
                "  {:<6} target {:>7.1}  achieved {:>7.1} ppm",
                b.element, b.target, b.achieved
            );
        }
        if let Some(id) = &saved_id {
            println!("Saved recipe {id}");
        }
    })
}

pub fn ph(args: &PhArgs, out: &Output) -> Result<(), AppError> {
    validate_ph("current", args.current)?;
    validate_ph("target", args.target)?;
    validate_volume(args.volume)?;
    validate_percent("acid concentration", args.concentration, false)?;

    let result = estimate(&PhAdjustmentParams {
        current_ph: args.current,
        target_ph: args.target,
        volume_liters: args.volume,
        acid: args.acid,
        acid_concentration: args.concentration,
    });

    out.emit(&result, || {
        println!("{}: {:.1} ml", result.acid_name, result.ml_needed);
        for c in &result.nutrient_contribution {
            println!("Adds {:.1} ppm {}", c.ppm, c.nutrient);
        }
        for w in &result.warnings {
            println!("- {w}");
        }
    })
}

pub fn vpd(args: &VpdArgs, out: &Output) -> Result<(), AppError> {
    validate_temperature("air", args.air)?;
    validate_temperature("leaf", args.leaf)?;
    validate_percent("humidity", args.humidity, true)?;

    let reading = vpd::compute(args.air, args.leaf, args.humidity, args.phase);
    let (min, max) = vpd::optimal_range(args.phase);

    out.emit(&reading, || {
        println!("VPD: {:.2} kPa ({:?}, optimal {min}-{max})", reading.vpd, reading.status);
        println!("Leaf VPD: {:.2} kPa", reading.leaf_vpd);
        println!("Air SVP: {:.2} kPa", reading.svp);
        println!("{}", reading.recommendation);
    })
}

pub fn salts(out: &Output) -> Result<(), AppError> {
    let salts = catalog::all_salts();
    out.emit(&salts, || {
        for s in &salts {
            let profile: Vec<String> = s
                .provides
                .iter()
                .map(|(e, pct)| format!("{e} {pct}%"))
                .collect();
            println!("{:<20} {:<14} {}", s.id, s.formula, profile.join(", "));
        }
    })
}

pub fn targets(system: Option<GrowingSystem>, out: &Output) -> Result<(), AppError> {
    let targets: Vec<_> = catalog::all_targets()
        .into_iter()
        .filter(|t| system.is_none_or(|s| t.system == s))
        .collect();
    out.emit(&targets, || {
        for t in &targets {
            let ppm: Vec<String> = t.ppm.iter().map(|(e, v)| format!("{e} {v}")).collect();
            println!(
                "{:<6} {:<13} EC {}-{}  pH {}-{}  {}",
                t.system,
                t.phase,
                t.ec_min,
                t.ec_max,
                t.ph_min,
                t.ph_max,
                ppm.join(", ")
            );
        }
    })
}

pub fn recipes<S: KeyValueStore>(
    cmd: RecipeCommand,
    store: &mut S,
    out: &Output,
) -> Result<(), AppError> {
    match cmd {
        RecipeCommand::List => {
            let recipes = storage::recipes::all(store)?;
            out.emit(&recipes, || {
                for r in &recipes {
                    println!(
                        "{}  {}  {} {}  {} {}  EC {:.2}",
                        r.id,
                        r.name,
                        r.phase,
                        r.system,
                        r.volume,
                        r.unit.symbol(),
                        r.estimated_ec
                    );
                }
            })
        }
        RecipeCommand::Show { id } => {
            let recipe = storage::recipes::by_id(store, &id)?
                .ok_or_else(|| AppError::RecordNotFound { kind: "recipe", id })?;
            out.emit(&recipe, || {
                println!("{} ({} / {})", recipe.name, recipe.phase, recipe.system);
                if !recipe.notes.is_empty() {
                    println!("{}", recipe.notes);
                }
                for r in &recipe.results {
                    println!("  {:<32} {:>10.3} g", r.salt.name, r.grams);
                }
                println!("Estimated EC: {:.2} mS/cm", recipe.estimated_ec);
            })
        }
        RecipeCommand::Delete { id } => {
            if !storage::recipes::delete(store, &id)? {
                return Err(AppError::RecordNotFound { kind: "recipe", id });
            }
            out.notice(&format!("Deleted recipe {id}"))
        }
    }
}

#[derive(Serialize)]
struct InventoryListing<'a> {
    items: &'a [InventoryItem],
    total_value: f64,
}

pub fn inventory<S: KeyValueStore>(
    cmd: InventoryCommand,
    store: &mut S,
    out: &Output,
) -> Result<(), AppError> {
    match cmd {
        InventoryCommand::List => {
            let items = storage::inventory::all(store)?;
            let listing = InventoryListing {
                items: &items,
                total_value: storage::inventory::total_value(&items),
            };
            out.emit(&listing, || {
                for i in &items {
                    println!(
                        "{:<20} {:>10.2} {:?}  {}  {:.2} {}/kg",
                        i.salt_id, i.stock, i.unit, i.location, i.cost_per_kg, i.currency
                    );
                }
                println!("Total value: {:.2}", listing.total_value);
            })
        }
        InventoryCommand::Set {
            salt,
            stock,
            unit,
            location,
            cost_per_kg,
            currency,
            notes,
        } => {
            if catalog::salt_by_id(&salt).is_none() {
                return Err(AppError::UnknownSalt(salt));
            }
            validate_non_negative("stock", stock)?;
            validate_non_negative("cost per kg", cost_per_kg)?;
            let item = InventoryItem {
                salt_id: salt,
                stock,
                unit,
                location,
                cost_per_kg,
                currency,
                last_updated: Utc::now(),
                notes,
            };
            storage::inventory::upsert(store, &item)?;
            out.emit(&item, || {
                println!("Stored {} {:?} of {}", item.stock, item.unit, item.salt_id)
            })
        }
        InventoryCommand::Deduct { salt, grams } => {
            validate_non_negative("grams", grams)?;
            if !storage::inventory::deduct_stock(store, &salt, grams, Utc::now())? {
                return Err(AppError::InvalidInput(format!(
                    "cannot deduct {grams} g of '{salt}': no record or not enough stock"
                )));
            }
            out.notice(&format!("Deducted {grams} g of {salt}"))
        }
        InventoryCommand::Delete { salt } => {
            if !storage::inventory::delete(store, &salt)? {
                return Err(AppError::RecordNotFound {
                    kind: "inventory item",
                    id: salt,
                });
            }
            out.notice(&format!("Deleted inventory for {salt}"))
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn watering<S: KeyValueStore>(
    cmd: WateringCommand,
    store: &mut S,
    out: &Output,
) -> Result<(), AppError> {
    match cmd {
        WateringCommand::Log {
            date,
            ec,
            ph,
            drainage,
            volume,
            phase,
            system,
            zone,
            recipe,
            notes,
        } => {
            validate_ph("measured", ph)?;
            validate_non_negative("EC", ec)?;
            validate_percent("drainage", drainage, true)?;
            validate_volume(volume)?;

            let zone_name = match &zone {
                Some(id) => Some(
                    storage::zones::by_id(store, id)?
                        .ok_or_else(|| AppError::RecordNotFound {
                            kind: "zone",
                            id: id.clone(),
                        })?
                        .name,
                ),
                None => None,
            };
            let recipe_name = match &recipe {
                Some(id) => Some(
                    storage::recipes::by_id(store, id)?
                        .ok_or_else(|| AppError::RecordNotFound {
                            kind: "recipe",
                            id: id.clone(),
                        })?
                        .name,
                ),
                None => None,
            };

            let record = WateringRecord {
                id: new_id(),
                date: date.unwrap_or_else(today),
                ec,
                ph,
                drainage,
                observations: notes,
                recipe_id: recipe,
                recipe_name,
                volume_liters: volume,
                phase,
                system,
                zone_id: zone,
                zone_name,
            };
            storage::watering::save(store, &record)?;

            let validation = validate_reading(ec, ph, phase, system);
            out.emit(
                &serde_json::json!({ "record": record, "validation": validation }),
                || {
                    println!("Logged watering {} on {}", record.id, record.date);
                    for msg in [&validation.ec_message, &validation.ph_message]
                        .into_iter()
                        .flatten()
                    {
                        println!("! {msg}");
                    }
                },
            )
        }
        WateringCommand::List { from, to } => {
            let records = match (from, to) {
                (None, None) => storage::watering::all(store)?,
                (from, to) => storage::watering::in_date_range(
                    store,
                    from.unwrap_or(NaiveDate::MIN),
                    to.unwrap_or(NaiveDate::MAX),
                )?,
            };
            out.emit(&records, || {
                for r in &records {
                    println!(
                        "{}  {}  EC {:.2}  pH {:.1}  drain {}%  {} L  {}",
                        r.id,
                        r.date,
                        r.ec,
                        r.ph,
                        r.drainage,
                        r.volume_liters,
                        r.zone_name.as_deref().unwrap_or("-")
                    );
                }
            })
        }
        WateringCommand::Delete { id } => {
            if !storage::watering::delete(store, &id)? {
                return Err(AppError::RecordNotFound {
                    kind: "watering record",
                    id,
                });
            }
            out.notice(&format!("Deleted watering record {id}"))
        }
        WateringCommand::Stats => {
            let records = storage::watering::all(store)?;
            let Some(stats) = history_stats(&records) else {
                return out.notice("No watering records yet");
            };
            out.emit(&stats, || {
                println!("Waterings: {}", stats.count);
                println!("Avg EC:       {:.2} ({:?})", stats.avg_ec, stats.ec_trend);
                println!("Avg pH:       {:.2} ({:?})", stats.avg_ph, stats.ph_trend);
                println!(
                    "Avg drainage: {:.1}% ({:?})",
                    stats.avg_drainage, stats.drainage_trend
                );
                println!(
                    "Avg volume:   {:.2} L ({:?})",
                    stats.avg_volume, stats.volume_trend
                );
            })
        }
        WateringCommand::Check {
            ec,
            ph,
            phase,
            system,
        } => {
            validate_ph("measured", ph)?;
            let validation = validate_reading(ec, ph, phase, system);
            out.emit(&validation, || {
                println!(
                    "EC {:?}, pH {:?}",
                    validation.ec_status, validation.ph_status
                );
                for msg in [&validation.ec_message, &validation.ph_message]
                    .into_iter()
                    .flatten()
                {
                    println!("! {msg}");
                }
            })
        }
    }
}

pub fn zones<S: KeyValueStore>(
    cmd: ZoneCommand,
    store: &mut S,
    out: &Output,
) -> Result<(), AppError> {
    match cmd {
        ZoneCommand::Add {
            name,
            kind,
            description,
        } => {
            let zone = Zone {
                id: new_id(),
                name,
                kind,
                description,
                created_at: Utc::now(),
            };
            storage::zones::save(store, &zone)?;
            out.emit(&zone, || println!("Added zone {} ({})", zone.name, zone.id))
        }
        ZoneCommand::List => {
            let zones = storage::zones::all(store)?;
            out.emit(&zones, || {
                for z in &zones {
                    println!(
                        "{}  {:?}  {}  {}",
                        z.id,
                        z.kind,
                        z.name,
                        z.description.as_deref().unwrap_or("")
                    );
                }
            })
        }
        ZoneCommand::Rename {
            id,
            name,
            description,
        } => {
            let mut zone = storage::zones::by_id(store, &id)?
                .ok_or_else(|| AppError::RecordNotFound {
                    kind: "zone",
                    id: id.clone(),
                })?;
            zone.name = name;
            if description.is_some() {
                zone.description = description;
            }
            storage::zones::update(store, &zone)?;
            out.emit(&zone, || println!("Updated zone {}", zone.id))
        }
        ZoneCommand::Delete { id } => {
            if !storage::zones::delete(store, &id)? {
                return Err(AppError::RecordNotFound { kind: "zone", id });
            }
            out.notice(&format!("Deleted zone {id}"))
        }
    }
}

pub fn reminder<S: KeyValueStore>(
    cmd: ReminderCommand,
    store: &mut S,
    out: &Output,
) -> Result<(), AppError> {
    match cmd {
        ReminderCommand::Set {
            phase,
            interval,
            target_drainage,
            disabled,
            notifications,
        } => {
            validate_percent("target drainage", target_drainage, true)?;
            let days_interval = interval.unwrap_or_else(|| phase_interval_recommendation(phase));
            let settings = ReminderSettings {
                enabled: !disabled,
                days_interval,
                phase,
                target_drainage,
                last_reminder_date: None,
                notifications_enabled: notifications,
            };
            storage::reminders::save(store, &settings)?;
            out.emit(&settings, || {
                println!(
                    "Reminder every {} days for {} (target drainage {}%)",
                    settings.days_interval, settings.phase, settings.target_drainage
                );
            })
        }
        ReminderCommand::Show => match storage::reminders::load(store)? {
            Some(settings) => out.emit(&settings, || {
                println!(
                    "{} every {} days for {} (target drainage {}%)",
                    if settings.enabled { "Enabled" } else { "Disabled" },
                    settings.days_interval,
                    settings.phase,
                    settings.target_drainage
                );
            }),
            None => out.notice("No reminder configured"),
        },
        ReminderCommand::Clear => {
            storage::reminders::clear(store)?;
            out.notice("Reminder cleared")
        }
        ReminderCommand::Next { today: as_of } => {
            let settings = storage::reminders::load(store)?.unwrap_or_default();
            if !settings.enabled {
                return out.notice("Reminders are disabled");
            }
            let records = storage::watering::all(store)?;
            let schedule = next_watering(
                latest_record(&records),
                settings.days_interval,
                settings.target_drainage,
                as_of.unwrap_or_else(today),
            );
            out.emit(&schedule, || println!("{}", schedule.message))
        }
    }
}
