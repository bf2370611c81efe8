//! Chemistry module: constants and small helpers shared by the calculators.
//!
//! This module provides:
//! - Rule-of-thumb factors used by the dosing solver (EC estimate, negligible dose)
//! - Acid properties for pH-down estimates (density, relative strength, molar masses)
//! - Magnus-Tetens coefficients for saturated vapour pressure
//! - Unit conversions and rounding
//!
//! Units conventions:
//! - Concentrations are mg/L (ppm) unless otherwise stated
//! - Salt profiles are mass percent of each element
//! - Temperatures are °C, pressures kPa, volumes litres
//!
//! Design notes:
//! - The EC factor and the acid base rate are empirical approximations and are
//!   kept as-is; saved recipes must reproduce the same numbers
//! - Acid densities refer to the common commercial strengths (85 % H3PO4,
//!   65 % HNO3, 98 % H2SO4) at 20 °C
//!
//! # Examples
//! ```rust
//! use nutrient_rs::chemistry::{saturated_vapor_pressure_kpa, round_to};
//!
//! let svp = saturated_vapor_pressure_kpa(25.0);
//! assert_eq!(round_to(svp, 2), 3.17);
//! ```
//!
//! # Panics
//! None of the functions panic.

use serde::{Deserialize, Serialize};

/// EC (mS/cm) per g/L of dissolved salts. Rough, independent of ion type.
pub const EC_PER_G_PER_L: f64 = 0.7;
/// Doses at or below this mass (g) are dropped by the solver.
pub const NEGLIGIBLE_DOSE_G: f64 = 0.001;

/// Litres per US gallon.
pub const LITERS_PER_GALLON: f64 = 3.78541;

/// ml of acid per litre per pH unit at the reference concentration.
pub const ACID_BASE_ML_PER_L_PER_PH: f64 = 1.0;
/// Concentration (%) the base rate refers to.
pub const ACID_REFERENCE_CONCENTRATION: f64 = 85.0;
/// pH drop above which the adjustment should be split into stages.
pub const LARGE_PH_DIFF: f64 = 2.0;

/// Molar masses (g/mol), rounded the way the dosing tables use them.
pub const M_H3PO4: f64 = 98.0;
pub const M_HNO3: f64 = 63.0;
pub const M_H2SO4: f64 = 98.0;
pub const M_P: f64 = 31.0;
pub const M_N: f64 = 14.0;
pub const M_S: f64 = 32.0;

/// Magnus-Tetens coefficients: svp = A * exp(B*T / (T + C)).
pub const MAGNUS_A_KPA: f64 = 0.6108;
pub const MAGNUS_B: f64 = 17.27;
pub const MAGNUS_C: f64 = 237.3;

/// pH-down acids supported by the estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Acid {
    Phosphoric,
    Nitric,
    Sulfuric,
}

impl Acid {
    /// Density (g/ml) of the commercial grade at 20 °C.
    pub fn density_g_per_ml(self) -> f64 {
        match self {
            Acid::Phosphoric => 1.685,
            Acid::Nitric => 1.41,
            Acid::Sulfuric => 1.84,
        }
    }

    /// Strength relative to phosphoric acid.
    pub fn relative_strength(self) -> f64 {
        match self {
            Acid::Phosphoric => 1.0,
            Acid::Nitric => 1.2,
            Acid::Sulfuric => 1.8,
        }
    }

    /// Element carried into the solution, with its mass fraction of the acid.
    pub fn nutrient_fraction(self) -> (&'static str, f64) {
        match self {
            Acid::Phosphoric => ("P", M_P / M_H3PO4),
            Acid::Nitric => ("N-NO3", M_N / M_HNO3),
            Acid::Sulfuric => ("S", M_S / M_H2SO4),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Acid::Phosphoric => "Phosphoric acid (H3PO4)",
            Acid::Nitric => "Nitric acid (HNO3)",
            Acid::Sulfuric => "Sulfuric acid (H2SO4)",
        }
    }
}

/// Saturated vapour pressure (kPa) at `temp_c` via Magnus-Tetens.
pub fn saturated_vapor_pressure_kpa(temp_c: f64) -> f64 {
    MAGNUS_A_KPA * ((MAGNUS_B * temp_c) / (temp_c + MAGNUS_C)).exp()
}

/// Round a floating-point value to a specified number of decimal digits.
pub fn round_to(x: f64, digits: i32) -> f64 {
    let p = 10f64.powi(digits);
    (x * p).round() / p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svp_at_zero_is_magnus_a() {
        assert_eq!(saturated_vapor_pressure_kpa(0.0), MAGNUS_A_KPA);
    }

    #[test]
    fn svp_grows_with_temperature() {
        assert!(saturated_vapor_pressure_kpa(30.0) > saturated_vapor_pressure_kpa(20.0));
    }

    #[test]
    fn acid_fractions_use_rounded_molar_masses() {
        let (label, frac) = Acid::Nitric.nutrient_fraction();
        assert_eq!(label, "N-NO3");
        assert!((frac - 14.0 / 63.0).abs() < 1e-12);
    }

    #[test]
    fn round_to_handles_halves() {
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(10.04, 1), 10.0);
    }
}
