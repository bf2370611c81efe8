use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::chemistry::Acid;
use crate::error::AppError;
use crate::models::{GrowingSystem, MassUnit, Nutrients, Phase, Salt, VolumeUnit, ZoneKind};

/// Temperature bounds (°C) accepted by `vpd`.
pub const MIN_TEMPERATURE_C: f64 = -50.0;
pub const MAX_TEMPERATURE_C: f64 = 70.0;

/// Longest base interval `reminder set` accepts.
pub const MAX_REMINDER_INTERVAL_DAYS: i64 = 365;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Nutrient solution calculator: salt dosing, pH-down, VPD and grow logs",
    long_about = None
)]
pub struct Args {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "NUTRIENT_RS_DATA_DIR",
        default_value = ".nutrient_rs",
        help = "Directory holding recipes, inventory, watering history and zones"
    )]
    pub data_dir: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute salt doses for a target nutrient profile
    Solve(SolveArgs),
    /// Estimate pH-down acid for a batch
    Ph(PhArgs),
    /// Compute vapour pressure deficit
    Vpd(VpdArgs),
    /// List the built-in salt catalogue
    Salts,
    /// List built-in nutrient targets
    Targets {
        #[arg(long)]
        system: Option<GrowingSystem>,
    },
    /// Saved recipes
    #[command(subcommand)]
    Recipes(RecipeCommand),
    /// Salt stock on hand
    #[command(subcommand)]
    Inventory(InventoryCommand),
    /// Watering log
    #[command(subcommand)]
    Watering(WateringCommand),
    /// Zones and plant batches
    #[command(subcommand)]
    Zones(ZoneCommand),
    /// Watering reminder settings
    #[command(subcommand)]
    Reminder(ReminderCommand),
}

#[derive(ClapArgs, Debug)]
pub struct SolveArgs {
    #[arg(long)]
    pub phase: Option<Phase>,
    #[arg(long)]
    pub system: Option<GrowingSystem>,
    #[arg(long)]
    pub volume: Option<f64>,
    #[arg(long, default_value = "L")]
    pub unit: VolumeUnit,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated salt ids from the catalogue"
    )]
    pub salts: Vec<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON target, e.g. '{\"N\":180,\"P\":50}' (overrides the built-in one)"
    )]
    pub target_json: Option<String>,
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with target, salts and volume_liters; '-' reads from stdin"
    )]
    pub input: Option<String>,
    /// Save the result as a recipe with this name.
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(ClapArgs, Debug)]
pub struct PhArgs {
    #[arg(long)]
    pub current: f64,
    #[arg(long)]
    pub target: f64,
    #[arg(long, help = "Batch volume in litres")]
    pub volume: f64,
    #[arg(long, default_value = "phosphoric")]
    pub acid: Acid,
    #[arg(long, default_value_t = 85.0, help = "Acid concentration in percent")]
    pub concentration: f64,
}

#[derive(ClapArgs, Debug)]
pub struct VpdArgs {
    #[arg(long, allow_negative_numbers = true, help = "Air temperature in °C")]
    pub air: f64,
    #[arg(long, allow_negative_numbers = true, help = "Leaf temperature in °C")]
    pub leaf: f64,
    #[arg(long, help = "Relative humidity in percent")]
    pub humidity: f64,
    #[arg(long)]
    pub phase: Phase,
}

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    List,
    Show { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum InventoryCommand {
    List,
    /// Create or replace the stock record for a salt
    Set {
        #[arg(long)]
        salt: String,
        #[arg(long)]
        stock: f64,
        #[arg(long, default_value = "g")]
        unit: MassUnit,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value_t = 0.0)]
        cost_per_kg: f64,
        #[arg(long, default_value = "EUR")]
        currency: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Take grams out of stock
    Deduct {
        #[arg(long)]
        salt: String,
        #[arg(long)]
        grams: f64,
    },
    Delete {
        #[arg(long)]
        salt: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum WateringCommand {
    /// Record a watering
    Log {
        #[arg(long, help = "Date as YYYY-MM-DD (default: today)")]
        date: Option<NaiveDate>,
        #[arg(long)]
        ec: f64,
        #[arg(long)]
        ph: f64,
        #[arg(long, help = "Drainage in percent of applied volume")]
        drainage: f64,
        #[arg(long, help = "Applied volume in litres")]
        volume: f64,
        #[arg(long)]
        phase: Phase,
        #[arg(long)]
        system: GrowingSystem,
        #[arg(long, value_name = "ZONE_ID")]
        zone: Option<String>,
        #[arg(long, value_name = "RECIPE_ID")]
        recipe: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    Delete {
        id: String,
    },
    /// Averages and trends over the whole history
    Stats,
    /// Check an EC/pH reading against the target window
    Check {
        #[arg(long)]
        ec: f64,
        #[arg(long)]
        ph: f64,
        #[arg(long)]
        phase: Phase,
        #[arg(long)]
        system: GrowingSystem,
    },
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "zone")]
        kind: ZoneKind,
        #[arg(long)]
        description: Option<String>,
    },
    List,
    Rename {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReminderCommand {
    Set {
        #[arg(long)]
        phase: Phase,
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=MAX_REMINDER_INTERVAL_DAYS),
            help = "Base interval in days, 1-365 (default: recommended for the phase)"
        )]
        interval: Option<u32>,
        #[arg(long, default_value_t = 20.0)]
        target_drainage: f64,
        #[arg(long)]
        disabled: bool,
        #[arg(long)]
        notifications: bool,
    },
    Show,
    Clear,
    /// When the next watering is due
    Next {
        #[arg(long, help = "Evaluate as of this date (default: today)")]
        today: Option<NaiveDate>,
    },
}

/// Document accepted by `solve --input`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SolveInput {
    pub target: Nutrients,
    pub salts: Vec<Salt>,
    pub volume_liters: f64,
    #[serde(default)]
    pub phase: Option<Phase>,
    #[serde(default)]
    pub system: Option<GrowingSystem>,
}

/// Solver inputs after resolving the catalogue and built-in targets.
#[derive(Debug)]
pub struct SolveRequest {
    pub target: Option<Nutrients>,
    pub salts: Vec<Salt>,
    pub volume: f64,
    pub unit: VolumeUnit,
    pub phase: Option<Phase>,
    pub system: Option<GrowingSystem>,
}

impl SolveRequest {
    pub fn volume_liters(&self) -> f64 {
        self.unit.to_liters(self.volume)
    }
}

fn parse_cmd_input_doc(doc: &str) -> Result<SolveInput, AppError> {
    serde_json::from_str(doc).map_err(|source| AppError::ParseCmdInputJson { source })
}

fn read_input_doc(path: &str) -> Result<String, AppError> {
    if path == "-" {
        let mut s = String::new();
        io::stdin()
            .read_to_string(&mut s)
            .map_err(|source| AppError::ReadStdin { source })?;
        Ok(s)
    } else {
        fs::read_to_string(path).map_err(|source| AppError::ReadFile {
            path: path.to_string(),
            source,
        })
    }
}

pub fn parse_solve_request(args: &SolveArgs) -> Result<SolveRequest, AppError> {
    if let Some(path) = &args.input {
        let doc = parse_cmd_input_doc(&read_input_doc(path)?)?;
        validate_volume(doc.volume_liters)?;
        validate_profile("target", &doc.target)?;
        for salt in &doc.salts {
            validate_salt(salt)?;
        }
        return Ok(SolveRequest {
            target: Some(doc.target),
            salts: doc.salts,
            volume: doc.volume_liters,
            unit: VolumeUnit::Liters,
            phase: doc.phase.or(args.phase),
            system: doc.system.or(args.system),
        });
    }

    let (Some(phase), Some(system), Some(volume)) = (args.phase, args.system, args.volume) else {
        return Err(AppError::MissingInputData);
    };
    validate_volume(volume)?;

    let target = match &args.target_json {
        Some(json) => {
            let profile = serde_json::from_str::<Nutrients>(json)
                .map_err(|source| AppError::ParseTargetJson { source })?;
            validate_profile("target", &profile)?;
            Some(profile)
        }
        None => catalog::target_for(phase, system).map(|t| t.ppm),
    };

    Ok(SolveRequest {
        target,
        salts: catalog::salts_by_ids(args.salts.as_slice())?,
        volume,
        unit: args.unit,
        phase: Some(phase),
        system: Some(system),
    })
}

pub fn validate_volume(volume: f64) -> Result<(), AppError> {
    if volume.is_finite() && volume > 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "volume must be greater than 0 (got {volume})"
        )))
    }
}

pub fn validate_ph(label: &str, ph: f64) -> Result<(), AppError> {
    if (0.0..=14.0).contains(&ph) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "{label} pH must be between 0 and 14 (got {ph})"
        )))
    }
}

pub fn validate_percent(label: &str, value: f64, allow_zero: bool) -> Result<(), AppError> {
    let ok = if allow_zero {
        (0.0..=100.0).contains(&value)
    } else {
        value > 0.0 && value <= 100.0
    };
    if ok {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "{label} must be a percentage in {}0, 100] (got {value})",
            if allow_zero { "[" } else { "(" }
        )))
    }
}

/// Salts supplied by value: purity, when given, in (0, 100] and no negative
/// element percentages.
pub fn validate_salt(salt: &Salt) -> Result<(), AppError> {
    if let Some(purity) = salt.purity {
        validate_percent(&format!("purity of salt '{}'", salt.id), purity, false)?;
    }
    validate_profile(&format!("salt '{}'", salt.id), &salt.provides)
}

pub fn validate_profile(label: &str, profile: &Nutrients) -> Result<(), AppError> {
    for (element, &value) in profile {
        validate_non_negative(&format!("{label} {element}"), value)?;
    }
    Ok(())
}

/// Air or leaf temperature in °C, bounded well inside the range where the
/// Magnus approximation is finite.
pub fn validate_temperature(label: &str, temp_c: f64) -> Result<(), AppError> {
    if (MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&temp_c) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "{label} temperature must be between {MIN_TEMPERATURE_C} and \
             {MAX_TEMPERATURE_C} °C (got {temp_c})"
        )))
    }
}

pub fn validate_non_negative(label: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "{label} must not be negative (got {value})"
        )))
    }
}
