//! # Geochemical Transforms
//!
//! ## Purpose
//! Molar-mass data for the common oxides and the Mg-number calculation used
//! as a differentiation index: Mg# = molar Mg / (Mg + Fe2+).
//!
//! ## Key items
//! - `OXIDE_MASSES`: const table of oxide molar masses, g/mol
//! - `oxide_molar_mass`: lookup by oxide name
//! - `mg_number`: Mg# from MgO and FeO wt% values

// Define a struct to hold oxide data
pub struct OxideMass {
    name: &'static str,
    molar_mass: f64,
}

// Molar masses of the common oxides, g/mol
pub const OXIDE_MASSES: &[OxideMass] = &[
    OxideMass {
        name: "SiO2",
        molar_mass: 60.0843,
    },
    OxideMass {
        name: "TiO2",
        molar_mass: 79.8658,
    },
    OxideMass {
        name: "Al2O3",
        molar_mass: 101.9613,
    },
    OxideMass {
        name: "Fe2O3",
        molar_mass: 159.6882,
    },
    OxideMass {
        name: "Cr2O3",
        molar_mass: 151.9904,
    },
    OxideMass {
        name: "FeO",
        molar_mass: 71.8444,
    },
    OxideMass {
        name: "MnO",
        molar_mass: 70.9374,
    },
    OxideMass {
        name: "MgO",
        molar_mass: 40.3044,
    },
    OxideMass {
        name: "NiO",
        molar_mass: 74.6928,
    },
    OxideMass {
        name: "CoO",
        molar_mass: 74.9326,
    },
    OxideMass {
        name: "CaO",
        molar_mass: 56.0774,
    },
    OxideMass {
        name: "Na2O",
        molar_mass: 61.9789,
    },
    OxideMass {
        name: "K2O",
        molar_mass: 94.1960,
    },
    OxideMass {
        name: "P2O5",
        molar_mass: 141.9445,
    },
    OxideMass {
        name: "H2O",
        molar_mass: 18.0153,
    },
    OxideMass {
        name: "CO2",
        molar_mass: 44.0095,
    },
];

/// Molar mass of an oxide by name, g/mol.
pub fn oxide_molar_mass(name: &str) -> Option<f64> {
    OXIDE_MASSES
        .iter()
        .find(|o| o.name == name)
        .map(|o| o.molar_mass)
}

/// Mg# from MgO and FeO in wt%: molar Mg / (Mg + Fe2+).
/// NaN inputs propagate; both inputs zero gives NaN (0/0).
pub fn mg_number(mgo_wt: f64, feo_wt: f64) -> f64 {
    let mg = mgo_wt / 40.3044;
    let fe = feo_wt / 71.8444;
    mg / (mg + fe)
}
