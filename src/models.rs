use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Element symbol ("N-NO3", "P", "Ca", ...) to a concentration.
///
/// Targets and dosing contributions are ppm (mg/L); salt profiles are mass
/// percent of the element in the salt.
pub type Nutrients = BTreeMap<String, f64>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SaltKind {
    Macro,
    Secondary,
    Micro,
    #[cfg_attr(feature = "cli", value(name = "micro_mix"))]
    MicroMix,
    #[cfg_attr(feature = "cli", value(name = "macro_mix"))]
    MacroMix,
    Additive,
    #[cfg_attr(feature = "cli", value(name = "ph_up"))]
    PhUp,
    #[cfg_attr(feature = "cli", value(name = "ph_down"))]
    PhDown,
    Organic,
}

impl SaltKind {
    /// Dosing order: lower goes first. Organic inputs have no slot and sort last.
    pub fn priority(self) -> u8 {
        match self {
            SaltKind::Macro => 1,
            SaltKind::Secondary => 2,
            SaltKind::Micro => 3,
            SaltKind::MicroMix => 4,
            SaltKind::MacroMix => 5,
            SaltKind::Additive => 6,
            SaltKind::PhDown => 7,
            SaltKind::PhUp => 8,
            SaltKind::Organic => 99,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Salt {
    pub id: String,
    pub name: String,
    pub formula: String,
    pub kind: SaltKind,
    /// Mass percent of each element supplied by the salt.
    pub provides: Nutrients,
    #[serde(default)]
    pub purity: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Salt {
    /// Purity as a fraction. Missing or zero purity counts as 100 %.
    pub fn purity_fraction(&self) -> f64 {
        self.purity.filter(|&p| p > 0.0).unwrap_or(100.0) / 100.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Seedling,
    Vegetative,
    #[cfg_attr(feature = "cli", value(name = "flowering_t1"))]
    FloweringT1,
    #[cfg_attr(feature = "cli", value(name = "flowering_t2"))]
    FloweringT2,
    #[cfg_attr(feature = "cli", value(name = "flowering_t3"))]
    FloweringT3,
    Flush,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Seedling,
        Phase::Vegetative,
        Phase::FloweringT1,
        Phase::FloweringT2,
        Phase::FloweringT3,
        Phase::Flush,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Seedling => "seedling",
            Phase::Vegetative => "vegetative",
            Phase::FloweringT1 => "flowering_t1",
            Phase::FloweringT2 => "flowering_t2",
            Phase::FloweringT3 => "flowering_t3",
            Phase::Flush => "flush",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum GrowingSystem {
    Soil,
    Coco,
    Hydro,
}

impl GrowingSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            GrowingSystem::Soil => "soil",
            GrowingSystem::Coco => "coco",
            GrowingSystem::Hydro => "hydro",
        }
    }
}

impl fmt::Display for GrowingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrient profile and acceptable EC/pH window for one phase and system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub phase: Phase,
    pub system: GrowingSystem,
    pub ppm: Nutrients,
    pub ec_min: f64,
    pub ec_max: f64,
    pub ph_min: f64,
    pub ph_max: f64,
}

/// One dosed salt: grams for the whole batch and the ppm it adds per element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DosingResult {
    pub salt: Salt,
    pub grams: f64,
    pub ppm_added: Nutrients,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum VolumeUnit {
    #[default]
    #[serde(rename = "L")]
    #[cfg_attr(feature = "cli", value(name = "L", alias = "l"))]
    Liters,
    #[serde(rename = "gal")]
    #[cfg_attr(feature = "cli", value(name = "gal"))]
    Gallons,
}

impl VolumeUnit {
    pub fn to_liters(self, volume: f64) -> f64 {
        match self {
            VolumeUnit::Liters => volume,
            VolumeUnit::Gallons => volume * crate::chemistry::LITERS_PER_GALLON,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Liters => "L",
            VolumeUnit::Gallons => "gal",
        }
    }
}

/// A solved recipe frozen at save time. `results` holds salts by value so
/// later catalogue edits cannot change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedRecipe {
    pub id: String,
    pub name: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub system: GrowingSystem,
    pub volume: f64,
    pub unit: VolumeUnit,
    pub target_ppm: Nutrients,
    pub results: Vec<DosingResult>,
    pub estimated_ec: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    #[default]
    G,
    Kg,
}

impl MassUnit {
    pub fn to_grams(self, amount: f64) -> f64 {
        match self {
            MassUnit::G => amount,
            MassUnit::Kg => amount * 1000.0,
        }
    }

    pub fn grams_in_unit(self, grams: f64) -> f64 {
        match self {
            MassUnit::G => grams,
            MassUnit::Kg => grams / 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub salt_id: String,
    pub stock: f64,
    pub unit: MassUnit,
    pub location: String,
    pub cost_per_kg: f64,
    pub currency: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InventoryItem {
    pub fn stock_grams(&self) -> f64 {
        self.unit.to_grams(self.stock)
    }

    pub fn value(&self) -> f64 {
        let stock_kg = match self.unit {
            MassUnit::Kg => self.stock,
            MassUnit::G => self.stock / 1000.0,
        };
        stock_kg * self.cost_per_kg
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WateringRecord {
    pub id: String,
    pub date: NaiveDate,
    pub ec: f64,
    pub ph: f64,
    /// Percent of the applied volume that drained.
    pub drainage: f64,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub recipe_name: Option<String>,
    pub volume_liters: f64,
    pub phase: Phase,
    pub system: GrowingSystem,
    #[serde(default)]
    pub zone_id: Option<String>,
    #[serde(default)]
    pub zone_name: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    #[default]
    Zone,
    Batch,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub kind: ZoneKind,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub days_interval: u32,
    pub phase: Phase,
    pub target_drainage: f64,
    #[serde(default)]
    pub last_reminder_date: Option<NaiveDate>,
    pub notifications_enabled: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            days_interval: 2,
            phase: Phase::Vegetative,
            target_drainage: 20.0,
            last_reminder_date: None,
            notifications_enabled: false,
        }
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
