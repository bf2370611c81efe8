use serde::Serialize;

use crate::chemistry::{round_to, saturated_vapor_pressure_kpa};
use crate::models::Phase;

pub const RECOMMEND_LOW: &str =
    "Low VPD: raise temperature or lower humidity to improve transpiration and nutrient uptake.";
pub const RECOMMEND_HIGH: &str =
    "High VPD: lower temperature or raise humidity to avoid water stress and stomatal closure.";
pub const RECOMMEND_OPTIMAL: &str =
    "Optimal VPD: ideal conditions for transpiration and growth in this phase.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VpdStatus {
    Low,
    Optimal,
    High,
}

/// Optimal VPD band (kPa) for a phase, inclusive.
pub fn optimal_range(phase: Phase) -> (f64, f64) {
    match phase {
        Phase::Seedling => (0.4, 0.8),
        Phase::Vegetative => (0.8, 1.2),
        Phase::FloweringT1 => (1.0, 1.4),
        Phase::FloweringT2 | Phase::FloweringT3 => (1.2, 1.6),
        Phase::Flush => (0.8, 1.2),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VpdReading {
    /// Leaf-to-air VPD, kPa, two decimals.
    pub vpd: f64,
    pub status: VpdStatus,
    pub recommendation: &'static str,
    /// Saturated vapour pressure of the air, kPa, two decimals.
    pub svp: f64,
    /// VPD assuming leaf-temperature air at the same humidity.
    pub leaf_vpd: f64,
}

/// Compute VPD and classify it against the phase's optimal band.
///
/// `vpd = svp(leaf) - svp(air) * rh / 100`. Classification uses the unrounded
/// value; the reported figures are rounded to 0.01 kPa.
pub fn compute(
    air_temp_c: f64,
    leaf_temp_c: f64,
    relative_humidity: f64,
    phase: Phase,
) -> VpdReading {
    let svp_air = saturated_vapor_pressure_kpa(air_temp_c);
    let svp_leaf = saturated_vapor_pressure_kpa(leaf_temp_c);

    let vpd = svp_leaf - svp_air * (relative_humidity / 100.0);
    let leaf_vpd = svp_leaf * (1.0 - relative_humidity / 100.0);

    let (min, max) = optimal_range(phase);
    let (status, recommendation) = if vpd < min {
        (VpdStatus::Low, RECOMMEND_LOW)
    } else if vpd > max {
        (VpdStatus::High, RECOMMEND_HIGH)
    } else {
        (VpdStatus::Optimal, RECOMMEND_OPTIMAL)
    };

    VpdReading {
        vpd: round_to(vpd, 2),
        status,
        recommendation,
        svp: round_to(svp_air, 2),
        leaf_vpd: round_to(leaf_vpd, 2),
    }
}
