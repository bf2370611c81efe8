//! pH-down estimate: how much acid to add to bring a batch down to target.
//!
//! This is a rough linear rule. Real buffering depends on water hardness and
//! on the salts already dissolved, which is why every non-trivial result
//! carries procedural warnings and suggests dosing half first.

use serde::{Deserialize, Serialize};

use crate::chemistry::{
    ACID_BASE_ML_PER_L_PER_PH, ACID_REFERENCE_CONCENTRATION, Acid, LARGE_PH_DIFF, round_to,
};

pub const WARN_NO_ACID_NEEDED: &str =
    "Current pH is already at or below the target. No acid is needed.";
pub const WARN_LARGE_DIFF: &str =
    "CAUTION: very large pH difference. Adjust gradually in several stages.";
pub const WARN_SULFURIC: &str =
    "DANGER: sulfuric acid is extremely corrosive. Wear full PPE and ALWAYS add it to water.";
pub const WARN_ESTIMATE: &str =
    "This is an estimate. ALWAYS add acid gradually and measure after each addition.";
pub const WARN_ACID_TO_WATER: &str = "Add acid to water, never water to acid.";
pub const WARN_WAIT: &str = "Wait 5-10 minutes after adding acid before measuring again.";
pub const WARN_HALF_DOSE: &str =
    "Recommendation: add only 50% of the calculated amount, measure, and adjust as needed.";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhAdjustmentParams {
    pub current_ph: f64,
    pub target_ph: f64,
    pub volume_liters: f64,
    pub acid: Acid,
    /// Acid concentration in percent, e.g. 85 for 85 % H3PO4.
    pub acid_concentration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NutrientContribution {
    pub nutrient: &'static str,
    pub ppm: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhAdjustment {
    /// ml of acid, rounded to 0.1.
    pub ml_needed: f64,
    pub acid_name: &'static str,
    pub warnings: Vec<&'static str>,
    pub nutrient_contribution: Vec<NutrientContribution>,
}

/// Estimate ml of acid to move `current_ph` down to `target_ph`.
///
/// `ml = (current - target) * volume * 1.0 / (concentration / 85) / strength`,
/// rounded to one decimal, where strength is 1.0 / 1.2 / 1.8 for phosphoric,
/// nitric and sulfuric acid. When no drop is needed the result is zero with a
/// single informational warning.
pub fn estimate(params: &PhAdjustmentParams) -> PhAdjustment {
    let acid_name = params.acid.display_name();

    if params.current_ph <= params.target_ph {
        return PhAdjustment {
            ml_needed: 0.0,
            acid_name,
            warnings: vec![WARN_NO_ACID_NEEDED],
            nutrient_contribution: Vec::new(),
        };
    }

    let ph_diff = params.current_ph - params.target_ph;
    let mut warnings = Vec::new();
    if ph_diff > LARGE_PH_DIFF {
        warnings.push(WARN_LARGE_DIFF);
    }
    if params.acid == Acid::Sulfuric {
        warnings.push(WARN_SULFURIC);
    }

    let concentration_factor = params.acid_concentration / ACID_REFERENCE_CONCENTRATION;
    let ml = ph_diff * params.volume_liters * ACID_BASE_ML_PER_L_PER_PH / concentration_factor;
    let ml_needed = round_to(ml / params.acid.relative_strength(), 1);

    warnings.extend([WARN_ESTIMATE, WARN_ACID_TO_WATER, WARN_WAIT, WARN_HALF_DOSE]);

    PhAdjustment {
        ml_needed,
        acid_name,
        warnings,
        nutrient_contribution: vec![nutrient_contribution(
            params.acid,
            ml_needed,
            params.volume_liters,
            params.acid_concentration,
        )],
    }
}

/// ppm of P, N-NO3 or S carried in by `ml_acid` of the given acid.
pub fn nutrient_contribution(
    acid: Acid,
    ml_acid: f64,
    volume_liters: f64,
    concentration: f64,
) -> NutrientContribution {
    let grams_acid = ml_acid * acid.density_g_per_ml() * (concentration / 100.0);
    let (nutrient, fraction) = acid.nutrient_fraction();
    let ppm = (grams_acid * fraction / volume_liters) * 1000.0;
    NutrientContribution {
        nutrient,
        ppm: round_to(ppm, 1),
    }
}
