pub mod adapters;
pub mod catalog;
pub mod chemistry;
pub mod climate;
pub mod error;
pub mod models;
pub mod nutrients;
pub mod ph;
pub mod storage;
pub mod watering;

pub use crate::chemistry::Acid;
pub use crate::climate::vpd::{VpdReading, VpdStatus};
pub use crate::error::AppError;
pub use crate::models::{
    DosingResult, GrowingSystem, InventoryItem, Nutrients, Phase, ReminderSettings, Salt,
    SaltKind, SavedRecipe, Target, VolumeUnit, WateringRecord, Zone,
};
pub use crate::nutrients::solver::{
    DosingSummary, compute_summary, estimated_ec, solve, total_nutrients,
};
pub use crate::ph::adjustment::{PhAdjustment, PhAdjustmentParams};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
