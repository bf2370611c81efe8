//! Built-in salt catalogue. Profiles are mass percent of each element.

use crate::models::{Nutrients, Salt, SaltKind};

fn salt(
    id: &str,
    name: &str,
    formula: &str,
    kind: SaltKind,
    provides: &[(&str, f64)],
    purity: f64,
    notes: &str,
) -> Salt {
    Salt {
        id: id.to_string(),
        name: name.to_string(),
        formula: formula.to_string(),
        kind,
        provides: provides
            .iter()
            .map(|(e, pct)| (e.to_string(), *pct))
            .collect::<Nutrients>(),
        purity: Some(purity),
        notes: Some(notes.to_string()),
    }
}

/// Fertilizer salts, in catalogue order.
pub fn primary_salts() -> Vec<Salt> {
    vec![
        salt(
            "calcium_nitrate",
            "Calcium nitrate (tetrahydrate)",
            "Ca(NO3)2·4H2O",
            SaltKind::Macro,
            &[("N-NO3", 11.86), ("Ca", 16.97)],
            99.0,
            "Tank A. Main Ca + N-NO3 source. Never mix concentrated with sulfates or phosphates.",
        ),
        salt(
            "potassium_nitrate",
            "Potassium nitrate",
            "KNO3",
            SaltKind::Macro,
            &[("N-NO3", 13.86), ("K", 38.67)],
            99.0,
            "K + N-NO3 for every phase, especially flowering.",
        ),
        salt(
            "mkp",
            "Monopotassium phosphate (MKP)",
            "KH2PO4",
            SaltKind::Macro,
            &[("P", 22.76), ("K", 28.73)],
            98.0,
            "Flowering staple. High P and K without N. Lowers pH slightly.",
        ),
        salt(
            "magnesium_nitrate",
            "Magnesium nitrate",
            "Mg(NO3)2·6H2O",
            SaltKind::Macro,
            &[("N-NO3", 10.93), ("Mg", 9.48)],
            99.0,
            "Mg + N-NO3. Highly soluble.",
        ),
        salt(
            "potassium_sulfate",
            "Potassium sulfate",
            "K2SO4",
            SaltKind::Macro,
            &[("K", 44.87), ("S", 18.40)],
            98.0,
            "K without Cl or N. Supplies sulfur. Late flowering.",
        ),
        salt(
            "magnesium_sulfate",
            "Magnesium sulfate (Epsom salt)",
            "MgSO4·7H2O",
            SaltKind::Secondary,
            &[("Mg", 9.86), ("S", 13.01)],
            99.0,
            "Fast Mg correction. Very soluble. Prefer tank B.",
        ),
        salt(
            "map",
            "Monoammonium phosphate (MAP)",
            "NH4H2PO4",
            SaltKind::Macro,
            &[("N-NH4", 12.17), ("P", 26.93)],
            98.0,
            "High P + N-NH4. Use sparingly, especially in hydro. May lower pH.",
        ),
        salt(
            "iron_edta",
            "Iron chelate EDTA (13%)",
            "Fe-EDTA",
            SaltKind::Micro,
            &[("Fe", 13.0)],
            100.0,
            "Stable up to pH ~6.5. For soil/coco; use DTPA or EDDHA in hydro.",
        ),
        salt(
            "zinc_sulfate",
            "Zinc sulfate",
            "ZnSO4·7H2O",
            SaltKind::Micro,
            &[("Zn", 22.74), ("S", 11.15)],
            99.0,
            "Zn source. Very low doses; toxic in excess.",
        ),
        salt(
            "manganese_sulfate",
            "Manganese sulfate",
            "MnSO4·H2O",
            SaltKind::Micro,
            &[("Mn", 32.49), ("S", 18.97)],
            99.0,
            "Mn source. Low doses. Monitor in hydro.",
        ),
        salt(
            "boric_acid",
            "Boric acid",
            "H3BO3",
            SaltKind::Micro,
            &[("B", 17.48)],
            99.0,
            "Boron source. Micro-doses; narrow gap between deficiency and toxicity.",
        ),
        salt(
            "sodium_molybdate",
            "Sodium molybdate",
            "Na2MoO4·2H2O",
            SaltKind::Micro,
            &[("Mo", 39.65), ("Na", 19.00)],
            99.0,
            "Mo source. Trace amounts. Needed for nitrate reduction in the plant.",
        ),
    ]
}

/// pH-correction products.
pub fn ph_products() -> Vec<Salt> {
    vec![
        salt(
            "phosphoric_acid",
            "Phosphoric acid (85%)",
            "H3PO4",
            SaltKind::PhDown,
            &[("P", 26.84)],
            85.0,
            "Typical pH down. Adds P. Wear PPE. Add acid to water, never the reverse.",
        ),
        salt(
            "nitric_acid",
            "Nitric acid (65%)",
            "HNO3",
            SaltKind::PhDown,
            &[("N-NO3", 14.43)],
            65.0,
            "pH down for vegetative growth. Adds N-NO3. Very corrosive; PPE required.",
        ),
        salt(
            "potassium_carbonate",
            "Potassium carbonate",
            "K2CO3",
            SaltKind::PhUp,
            &[("K", 56.57)],
            99.0,
            "pH up. Adds K. Use carefully, it can raise pH sharply.",
        ),
    ]
}
