//! # MELTS Formula Parsing
//!
//! alphaMELTS prints mineral formulas in a compact notation where oxidation
//! state is marked with prime characters after the element symbol, e.g.
//! `Fe''0.18Mg1.82SiO4` for ferrous iron. `from_melts_cstr` rewrites such
//! strings into the canonical display form with brace-enclosed charges,
//! `Fe{2+}0.18Mg1.82SiO4`.

use regex::Regex;

/// Rewrite a compact MELTS formula string to canonical display form:
/// every run of primes after an element symbol becomes a `{n+}` charge
/// annotation. Strings without primes pass through unchanged.
pub fn from_melts_cstr(cstr: &str) -> String {
    let re = Regex::new(r"(?P<el>[A-Z][a-z]?)(?P<chg>'+)").unwrap();
    re.replace_all(cstr.trim(), |caps: &regex::Captures| {
        format!("{}{{{}+}}", &caps["el"], caps["chg"].len())
    })
    .into_owned()
}
