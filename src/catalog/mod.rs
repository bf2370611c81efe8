//! Built-in reference data: the salt catalogue and the phase/system targets.

pub mod salts;
pub mod targets;

use crate::error::AppError;
use crate::models::{GrowingSystem, Phase, Salt, Target};

pub use salts::{ph_products, primary_salts};
pub use targets::all_targets;

/// Primary salts followed by pH products.
pub fn all_salts() -> Vec<Salt> {
    let mut salts = primary_salts();
    salts.extend(ph_products());
    salts
}

pub fn salt_by_id(id: &str) -> Option<Salt> {
    all_salts().into_iter().find(|s| s.id == id)
}

/// Resolve ids against the catalogue, keeping catalogue order.
///
/// Unknown ids are an error; duplicates collapse to one entry.
pub fn salts_by_ids<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Salt>, AppError> {
    let catalogue = all_salts();
    if let Some(missing) = ids
        .iter()
        .map(AsRef::as_ref)
        .find(|id| !catalogue.iter().any(|s| s.id == *id))
    {
        return Err(AppError::UnknownSalt(missing.to_string()));
    }
    Ok(catalogue
        .into_iter()
        .filter(|s| ids.iter().any(|id| id.as_ref() == s.id))
        .collect())
}

/// Target for the pair, or `None` when the system has no tabulated profile.
pub fn target_for(phase: Phase, system: GrowingSystem) -> Option<Target> {
    all_targets()
        .into_iter()
        .find(|t| t.phase == phase && t.system == system)
}
