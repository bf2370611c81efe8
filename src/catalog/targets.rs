//! Nutrient targets per phase for the systems that have tabulated profiles.

use crate::models::{GrowingSystem, Nutrients, Phase, Target};

/// `[N, P, K, Ca, Mg, S]` ppm followed by EC and pH windows.
struct Row {
    phase: Phase,
    ppm: [f64; 6],
    ec: (f64, f64),
    ph: (f64, f64),
}

const ELEMENTS: [&str; 6] = ["N", "P", "K", "Ca", "Mg", "S"];

const HYDRO: [Row; 6] = [
    Row {
        phase: Phase::Seedling,
        ppm: [80.0, 30.0, 70.0, 60.0, 25.0, 30.0],
        ec: (0.4, 0.8),
        ph: (5.5, 6.0),
    },
    Row {
        phase: Phase::Vegetative,
        ppm: [180.0, 50.0, 180.0, 150.0, 50.0, 60.0],
        ec: (1.2, 1.8),
        ph: (5.5, 6.0),
    },
    Row {
        phase: Phase::FloweringT1,
        ppm: [140.0, 80.0, 220.0, 160.0, 55.0, 65.0],
        ec: (1.6, 2.2),
        ph: (5.5, 6.0),
    },
    Row {
        phase: Phase::FloweringT2,
        ppm: [100.0, 100.0, 260.0, 170.0, 60.0, 70.0],
        ec: (1.8, 2.4),
        ph: (5.5, 6.0),
    },
    Row {
        phase: Phase::FloweringT3,
        ppm: [60.0, 80.0, 240.0, 160.0, 55.0, 65.0],
        ec: (1.6, 2.0),
        ph: (5.5, 6.0),
    },
    Row {
        phase: Phase::Flush,
        ppm: [0.0; 6],
        ec: (0.0, 0.3),
        ph: (5.8, 6.2),
    },
];

const COCO: [Row; 6] = [
    Row {
        phase: Phase::Seedling,
        ppm: [90.0, 35.0, 80.0, 70.0, 30.0, 35.0],
        ec: (0.6, 1.0),
        ph: (5.8, 6.3),
    },
    Row {
        phase: Phase::Vegetative,
        ppm: [200.0, 55.0, 200.0, 170.0, 60.0, 70.0],
        ec: (1.4, 2.0),
        ph: (5.8, 6.3),
    },
    Row {
        phase: Phase::FloweringT1,
        ppm: [150.0, 85.0, 240.0, 180.0, 65.0, 75.0],
        ec: (1.8, 2.4),
        ph: (5.8, 6.3),
    },
    Row {
        phase: Phase::FloweringT2,
        ppm: [110.0, 110.0, 280.0, 190.0, 70.0, 80.0],
        ec: (2.0, 2.6),
        ph: (5.8, 6.3),
    },
    Row {
        phase: Phase::FloweringT3,
        ppm: [70.0, 85.0, 260.0, 180.0, 65.0, 75.0],
        ec: (1.8, 2.2),
        ph: (5.8, 6.3),
    },
    Row {
        phase: Phase::Flush,
        ppm: [0.0; 6],
        ec: (0.0, 0.4),
        ph: (6.0, 6.5),
    },
];

fn expand(system: GrowingSystem, rows: &[Row]) -> impl Iterator<Item = Target> + '_ {
    rows.iter().map(move |row| Target {
        phase: row.phase,
        system,
        ppm: ELEMENTS
            .iter()
            .zip(row.ppm)
            .map(|(e, v)| (e.to_string(), v))
            .collect::<Nutrients>(),
        ec_min: row.ec.0,
        ec_max: row.ec.1,
        ph_min: row.ph.0,
        ph_max: row.ph.1,
    })
}

/// Every tabulated target, hydro first then coco. Soil has no table.
pub fn all_targets() -> Vec<Target> {
    expand(GrowingSystem::Hydro, &HYDRO)
        .chain(expand(GrowingSystem::Coco, &COCO))
        .collect()
}
