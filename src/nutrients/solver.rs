use serde::Serialize;
use tracing::debug;

use crate::chemistry::{EC_PER_G_PER_L, NEGLIGIBLE_DOSE_G};
use crate::models::{DosingResult, Nutrients, Salt};

/// Compute grams of each salt needed to approach `target` in `volume_liters`.
///
/// Single greedy pass. Salts are visited by kind priority (macro, secondary,
/// micro, micro mix, macro mix, additive, pH down, pH up; anything else last),
/// keeping input order within a kind. Each salt is sized to close the
/// *limiting* element: among the elements it supplies that still have a
/// positive remaining requirement, the one with the largest
/// `remaining / contribution`. Everything else the salt supplies is added as a
/// side effect and may overshoot. Earlier doses are never revised.
///
/// Salts that supply nothing still needed, or whose dose would be at or below
/// `NEGLIGIBLE_DOSE_G`, are left out. An empty salt list or empty target
/// yields an empty result.
///
/// Parameters:
/// - `target`: ppm per element.
/// - `salts`: candidate salts; profiles in mass percent.
/// - `volume_liters`: batch volume, expected > 0.
pub fn solve(target: &Nutrients, salts: &[Salt], volume_liters: f64) -> Vec<DosingResult> {
    let mut remaining = target.clone();
    let mut achieved: Nutrients = target.keys().map(|k| (k.clone(), 0.0)).collect();
    let mut results = Vec::new();

    let mut ordered: Vec<&Salt> = salts.iter().collect();
    // sort_by_key is stable; ties keep input order.
    ordered.sort_by_key(|s| s.kind.priority());

    for salt in ordered {
        let Some((element, ratio)) = limiting_element(salt, &remaining) else {
            continue;
        };

        let purity = salt.purity_fraction();
        let grams = ratio * volume_liters / purity;
        if grams <= NEGLIGIBLE_DOSE_G {
            continue;
        }

        let mut ppm_added = Nutrients::new();
        for (nutrient, &contribution) in &salt.provides {
            let ppm = (grams / volume_liters) * contribution * purity;
            ppm_added.insert(nutrient.clone(), ppm);
            *achieved.entry(nutrient.clone()).or_insert(0.0) += ppm;
            if let Some(left) = remaining.get_mut(nutrient) {
                *left = (*left - ppm).max(0.0);
            }
        }

        debug!(salt = %salt.id, limiting = %element, grams, "dosed salt");
        results.push(DosingResult {
            salt: salt.clone(),
            grams,
            ppm_added,
        });
    }

    debug!(?achieved, ?remaining, "solver finished");
    results
}

/// Element with the largest `remaining / contribution` among those the salt
/// supplies (> 0) and the target still needs (> 0). The first element in map
/// order wins a tie.
fn limiting_element<'a>(salt: &'a Salt, remaining: &Nutrients) -> Option<(&'a str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for (nutrient, &contribution) in &salt.provides {
        let needed = remaining.get(nutrient).copied().unwrap_or(0.0);
        if contribution > 0.0 && needed > 0.0 {
            let ratio = needed / contribution;
            if best.is_none_or(|(_, max)| ratio > max) {
                best = Some((nutrient.as_str(), ratio));
            }
        }
    }
    best
}

/// Total grams across all dosed salts.
pub fn total_grams(results: &[DosingResult]) -> f64 {
    results.iter().map(|r| r.grams).sum()
}

/// Estimated EC (mS/cm): `g/L * 0.7`.
pub fn estimated_ec(results: &[DosingResult], volume_liters: f64) -> f64 {
    (total_grams(results) / volume_liters) * EC_PER_G_PER_L
}

/// Dissolved salts in g/L.
pub fn concentration_g_per_l(results: &[DosingResult], volume_liters: f64) -> f64 {
    total_grams(results) / volume_liters
}

/// Element-wise sum of `ppm_added` over every result.
pub fn total_nutrients(results: &[DosingResult]) -> Nutrients {
    let mut total = Nutrients::new();
    for result in results {
        for (nutrient, ppm) in &result.ppm_added {
            *total.entry(nutrient.clone()).or_insert(0.0) += ppm;
        }
    }
    total
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationGrade {
    /// Within 10 % of target.
    OnTarget,
    /// Within 25 %.
    Near,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Deviation {
    /// `(actual - target) / target * 100`; 0 for a zero target met exactly.
    pub percent: f64,
    pub grade: DeviationGrade,
}

/// How far an achieved concentration is from its target.
///
/// A zero target is on target only when nothing was added; otherwise it is
/// reported as off with an infinite percentage.
pub fn deviation(actual: f64, target: f64) -> Deviation {
    if target == 0.0 {
        return if actual == 0.0 {
            Deviation {
                percent: 0.0,
                grade: DeviationGrade::OnTarget,
            }
        } else {
            Deviation {
                percent: f64::INFINITY,
                grade: DeviationGrade::Off,
            }
        };
    }
    let percent = (actual - target) / target * 100.0;
    let grade = if percent.abs() < 10.0 {
        DeviationGrade::OnTarget
    } else if percent.abs() < 25.0 {
        DeviationGrade::Near
    } else {
        DeviationGrade::Off
    };
    Deviation { percent, grade }
}

/// Achieved-vs-target comparison for one element.
#[derive(Clone, Debug, Serialize)]
pub struct ElementBalance {
    pub element: String,
    pub target: f64,
    pub achieved: f64,
    pub deviation: Deviation,
}

/// Summary handed to callers after a solve.
#[derive(Clone, Debug, Serialize)]
pub struct DosingSummary {
    pub volume_liters: f64,
    pub results: Vec<DosingResult>,
    pub total_grams: f64,
    pub concentration_g_per_l: f64,
    pub estimated_ec: f64,
    pub balance: Vec<ElementBalance>,
}

/// Run the solver and collect the derived figures in one place.
pub fn compute_summary(target: &Nutrients, salts: &[Salt], volume_liters: f64) -> DosingSummary {
    let results = solve(target, salts, volume_liters);
    let totals = total_nutrients(&results);
    let balance = target
        .iter()
        .map(|(element, &wanted)| {
            let achieved = totals.get(element).copied().unwrap_or(0.0);
            ElementBalance {
                element: element.clone(),
                target: wanted,
                achieved,
                deviation: deviation(achieved, wanted),
            }
        })
        .collect();

    DosingSummary {
        volume_liters,
        total_grams: total_grams(&results),
        concentration_g_per_l: concentration_g_per_l(&results, volume_liters),
        estimated_ec: estimated_ec(&results, volume_liters),
        results,
        balance,
    }
}
