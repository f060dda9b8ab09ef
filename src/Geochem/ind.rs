//! # Geochemical Reference Indexes
//!
//! ## Purpose
//! Small reference lists used to classify table columns coming out of
//! alphaMELTS runs: major-element oxides reported in wt%, rare earth
//! elements and the usual trace elements reported in ppm.
//!
//! ## Key items
//! - `COMMON_OXIDES`: the major/minor oxide set alphaMELTS reports
//! - `REE`: lanthanide series, La..Lu
//! - `COMMON_TRACE_ELEMENTS`: REE plus the usual LILE/HFSE trace set
//! - `is_common_oxide` / `is_common_element`: membership helpers

/// Major and minor element oxides as they appear in MELTS composition
/// table headers.
pub const COMMON_OXIDES: &[&str] = &[
    "SiO2", "TiO2", "Al2O3", "Fe2O3", "Cr2O3", "FeO", "MnO", "MgO", "NiO", "CoO", "CaO", "Na2O",
    "K2O", "P2O5", "H2O", "CO2",
];

/// Rare earth elements, in order of atomic number.
pub const REE: &[&str] = &[
    "La", "Ce", "Pr", "Nd", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
];

/// Trace elements commonly carried through trace-element tables:
/// LILE, HFSE, transition metals and the REE.
pub const COMMON_TRACE_ELEMENTS: &[&str] = &[
    "Rb", "Ba", "Th", "U", "Nb", "Ta", "K", "Pb", "Sr", "P", "Zr", "Hf", "Ti", "Y", "Sc", "V",
    "Cr", "Co", "Ni", "Cu", "Zn", "Ga", "Cs", "Li", "Be", "La", "Ce", "Pr", "Nd", "Sm", "Eu",
    "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
];

pub fn is_common_oxide(name: &str) -> bool {
    COMMON_OXIDES.contains(&name)
}

pub fn is_common_element(name: &str) -> bool {
    COMMON_TRACE_ELEMENTS.contains(&name)
}

pub fn is_ree(name: &str) -> bool {
    REE.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oxide_membership() {
        assert!(is_common_oxide("MgO"));
        assert!(is_common_oxide("SiO2"));
        assert!(!is_common_oxide("mass"));
        assert!(!is_common_oxide("Temperature"));
    }

    #[test]
    fn test_element_membership() {
        assert!(is_common_element("Sr"));
        assert!(is_common_element("La"));
        assert!(!is_common_element("Pressure"));
    }

    #[test]
    fn test_ree_are_elements() {
        for el in REE {
            assert!(is_common_element(el), "{} missing from trace set", el);
        }
    }
}
