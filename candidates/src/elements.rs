//! Tabulated element data
//!
//! Symbols, standard atomic weights (IUPAC 2016) and single bond covalent radii (Cordero et al.,
//! Dalton Trans. 2008) for the elements hydrogen to radon. The tables are indexed by atomic
//! number, index zero is a placeholder.

use crate::error::{CandidateError, Result};

/// Largest atomic number with tabulated data
pub const MAX_ATOMIC_NUMBER: u8 = 86;

const SYMBOLS: [&str; 87] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn",
];

const MASSES: [f64; 87] = [
    1.0,
    1.008,
    4.002602,
    6.94,
    9.0121831,
    10.81,
    12.011,
    14.007,
    15.999,
    18.998403163,
    20.1797,
    22.98976928,
    24.305,
    26.9815385,
    28.085,
    30.973761998,
    32.06,
    35.45,
    39.948,
    39.0983,
    40.078,
    44.955908,
    47.867,
    50.9415,
    51.9961,
    54.938044,
    55.845,
    58.933194,
    58.6934,
    63.546,
    65.38,
    69.723,
    72.630,
    74.921595,
    78.971,
    79.904,
    83.798,
    85.4678,
    87.62,
    88.90584,
    91.224,
    92.90637,
    95.95,
    97.90721,
    101.07,
    102.90550,
    106.42,
    107.8682,
    112.414,
    114.818,
    118.710,
    121.760,
    127.60,
    126.90447,
    131.293,
    132.90545196,
    137.327,
    138.90547,
    140.116,
    140.90766,
    144.242,
    144.91276,
    150.36,
    151.964,
    157.25,
    158.92535,
    162.500,
    164.93033,
    167.259,
    168.93422,
    173.054,
    174.9668,
    178.49,
    180.94788,
    183.84,
    186.207,
    190.23,
    192.217,
    195.084,
    196.966569,
    200.592,
    204.38,
    207.2,
    208.98040,
    208.98243,
    209.98715,
    222.01758,
];

const COVALENT_RADII: [f64; 87] = [
    0.20, 0.31, 0.28, 1.28, 0.96, 0.84, 0.76, 0.71, 0.66, 0.57, 0.58, 1.66, 1.41, 1.21, 1.11, 1.07,
    1.05, 1.02, 1.06, 2.03, 1.76, 1.70, 1.60, 1.53, 1.39, 1.39, 1.32, 1.26, 1.24, 1.32, 1.22, 1.22,
    1.20, 1.19, 1.20, 1.20, 1.16, 2.20, 1.95, 1.90, 1.75, 1.64, 1.54, 1.47, 1.46, 1.42, 1.39, 1.45,
    1.44, 1.42, 1.39, 1.39, 1.38, 1.39, 1.40, 2.44, 2.15, 2.07, 2.04, 2.03, 2.01, 1.99, 1.98, 1.98,
    1.96, 1.94, 1.92, 1.92, 1.89, 1.90, 1.87, 1.87, 1.75, 1.70, 1.62, 1.51, 1.44, 1.41, 1.36, 1.36,
    1.32, 1.45, 1.46, 1.48, 1.40, 1.50, 1.50,
];

fn checked(number: u8) -> Result<usize> {
    if number == 0 || number > MAX_ATOMIC_NUMBER {
        Err(CandidateError::UnknownElement(number))
    } else {
        Ok(number as usize)
    }
}

/// Chemical symbol of an element
pub fn symbol(number: u8) -> Result<&'static str> {
    checked(number).map(|z| SYMBOLS[z])
}

/// Standard atomic weight in atomic mass units
pub fn atomic_mass(number: u8) -> Result<f64> {
    checked(number).map(|z| MASSES[z])
}

/// Single bond covalent radius in Ångström
pub fn covalent_radius(number: u8) -> Result<f64> {
    checked(number).map(|z| COVALENT_RADII[z])
}

/// Atomic number of a chemical symbol, e.g. `"Au"` is 79
pub fn atomic_number(symbol: &str) -> Result<u8> {
    SYMBOLS
        .iter()
        .skip(1)
        .position(|s| *s == symbol)
        .map(|idx| (idx + 1) as u8)
        .ok_or_else(|| CandidateError::UnknownSymbol(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_and_numbers_agree() {
        for z in 1..=MAX_ATOMIC_NUMBER {
            assert_eq!(atomic_number(symbol(z).unwrap()).unwrap(), z);
        }
        assert_eq!(atomic_number("Au").unwrap(), 79);
        assert_eq!(atomic_number("Cu").unwrap(), 29);
        assert!(atomic_number("X").is_err());
        assert!(atomic_number("Xx").is_err());
    }

    #[test]
    fn tabulated_values() {
        assert_eq!(atomic_mass(1).unwrap(), 1.008);
        assert_eq!(atomic_mass(79).unwrap(), 196.966569);
        assert_eq!(covalent_radius(6).unwrap(), 0.76);
        assert_eq!(covalent_radius(79).unwrap(), 1.36);
        assert_eq!(symbol(86).unwrap(), "Rn");
    }

    #[test]
    fn unknown_elements_are_errors() {
        assert!(matches!(atomic_mass(0), Err(CandidateError::UnknownElement(0))));
        assert!(matches!(
            covalent_radius(87),
            Err(CandidateError::UnknownElement(87))
        ));
    }
}
