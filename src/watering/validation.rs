use serde::Serialize;

use crate::catalog::target_for;
use crate::models::{GrowingSystem, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Optimal,
    Low,
    High,
    /// No target to compare against.
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReadingValidation {
    pub is_valid: bool,
    pub ec_status: ReadingStatus,
    pub ph_status: ReadingStatus,
    pub ec_message: Option<String>,
    pub ph_message: Option<String>,
}

/// Check a measured EC/pH pair against the target window for phase and system.
///
/// Without a tabulated target the reading is accepted with both statuses
/// `Unknown`.
pub fn validate_reading(
    ec: f64,
    ph: f64,
    phase: Phase,
    system: GrowingSystem,
) -> ReadingValidation {
    let Some(target) = target_for(phase, system) else {
        return ReadingValidation {
            is_valid: true,
            ec_status: ReadingStatus::Unknown,
            ph_status: ReadingStatus::Unknown,
            ec_message: None,
            ph_message: None,
        };
    };

    let (ec_status, ec_message) = if ec < target.ec_min {
        (
            ReadingStatus::Low,
            Some(format!(
                "Low EC: {ec:.2} mS/cm (optimal: {}-{})",
                target.ec_min, target.ec_max
            )),
        )
    } else if ec > target.ec_max {
        (
            ReadingStatus::High,
            Some(format!(
                "High EC: {ec:.2} mS/cm (optimal: {}-{})",
                target.ec_min, target.ec_max
            )),
        )
    } else {
        (ReadingStatus::Optimal, None)
    };

    let (ph_status, ph_message) = if ph < target.ph_min {
        (
            ReadingStatus::Low,
            Some(format!(
                "Low pH: {ph:.1} (optimal: {}-{})",
                target.ph_min, target.ph_max
            )),
        )
    } else if ph > target.ph_max {
        (
            ReadingStatus::High,
            Some(format!(
                "High pH: {ph:.1} (optimal: {}-{})",
                target.ph_min, target.ph_max
            )),
        )
    } else {
        (ReadingStatus::Optimal, None)
    };

    ReadingValidation {
        is_valid: ec_status == ReadingStatus::Optimal && ph_status == ReadingStatus::Optimal,
        ec_status,
        ph_status,
        ec_message,
        ph_message,
    }
}
