//! Molecular weights shared between the opacity tables and the chemistry layer.
//!
//! Opacity datasets are stored per unit mass and must be divided by the
//! number of molecules per gram to become per-molecule cross sections. The
//! chemistry layer uses the same weights to turn volume mixing ratios into
//! mass fractions, so both sides must consult one [`MolecularWeightSource`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ChemistryError, ChemistryResult};

/// Chemical elements that appear in atmospheric opacity species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn = 30,
}

impl Element {
    /// Standard atomic weight in g/mol.
    pub fn atomic_mass(&self) -> f64 {
        match self {
            Element::H => 1.008,
            Element::He => 4.0026,
            Element::Li => 6.94,
            Element::Be => 9.0122,
            Element::B => 10.81,
            Element::C => 12.011,
            Element::N => 14.007,
            Element::O => 15.999,
            Element::F => 18.998,
            Element::Ne => 20.18,
            Element::Na => 22.99,
            Element::Mg => 24.305,
            Element::Al => 26.982,
            Element::Si => 28.085,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::Cl => 35.45,
            Element::Ar => 39.948,
            Element::K => 39.098,
            Element::Ca => 40.078,
            Element::Sc => 44.956,
            Element::Ti => 47.867,
            Element::V => 50.942,
            Element::Cr => 51.996,
            Element::Mn => 54.938,
            Element::Fe => 55.845,
            Element::Co => 58.933,
            Element::Ni => 58.693,
            Element::Cu => 63.546,
            Element::Zn => 65.38,
        }
    }

    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::He => "He",
            Element::Li => "Li",
            Element::Be => "Be",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Ne => "Ne",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Al => "Al",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Ar => "Ar",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Sc => "Sc",
            Element::Ti => "Ti",
            Element::V => "V",
            Element::Cr => "Cr",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ChemistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Element::H),
            "He" => Ok(Element::He),
            "Li" => Ok(Element::Li),
            "Be" => Ok(Element::Be),
            "B" => Ok(Element::B),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "Ne" => Ok(Element::Ne),
            "Na" => Ok(Element::Na),
            "Mg" => Ok(Element::Mg),
            "Al" => Ok(Element::Al),
            "Si" => Ok(Element::Si),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "Cl" => Ok(Element::Cl),
            "Ar" => Ok(Element::Ar),
            "K" => Ok(Element::K),
            "Ca" => Ok(Element::Ca),
            "Sc" => Ok(Element::Sc),
            "Ti" => Ok(Element::Ti),
            "V" => Ok(Element::V),
            "Cr" => Ok(Element::Cr),
            "Mn" => Ok(Element::Mn),
            "Fe" => Ok(Element::Fe),
            "Co" => Ok(Element::Co),
            "Ni" => Ok(Element::Ni),
            "Cu" => Ok(Element::Cu),
            "Zn" => Ok(Element::Zn),
            _ => Err(ChemistryError::UnknownElement(s.to_string())),
        }
    }
}

/// Anything able to answer "what is the molecular weight of this species".
///
/// Opacity loaders take this as an explicit dependency so the normalization
/// they apply matches the chemistry layer exactly.
pub trait MolecularWeightSource: Send + Sync {
    /// Molecular weight in g/mol.
    fn molecular_weight(&self, molecule: &str) -> ChemistryResult<f64>;
}

/// Molecular weights computed from the chemical formula, with optional overrides.
#[derive(Debug, Clone, Default)]
pub struct FormulaWeights {
    overrides: HashMap<String, f64>,
}

impl FormulaWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fixed weight for a species, bypassing formula parsing.
    pub fn with_override(mut self, molecule: impl Into<String>, weight: f64) -> Self {
        self.overrides.insert(molecule.into(), weight);
        self
    }

    /// Parse a formula such as `H2O`, `CO2` or `TiO` into (element, count) pairs.
    pub fn parse_formula(formula: &str) -> ChemistryResult<Vec<(Element, u32)>> {
        if formula.is_empty() {
            return Err(ChemistryError::invalid_formula(formula, "empty formula"));
        }

        let chars: Vec<char> = formula.chars().collect();
        let mut parts = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if !chars[i].is_ascii_uppercase() {
                return Err(ChemistryError::invalid_formula(
                    formula,
                    format!("unexpected character '{}' at position {}", chars[i], i),
                ));
            }

            let mut symbol = chars[i].to_string();
            i += 1;
            if i < chars.len() && chars[i].is_ascii_lowercase() {
                symbol.push(chars[i]);
                i += 1;
            }
            let element: Element = symbol.parse()?;

            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let count = if start == i {
                1
            } else {
                let digits: String = chars[start..i].iter().collect();
                digits
                    .parse::<u32>()
                    .map_err(|e| ChemistryError::invalid_formula(formula, e.to_string()))?
            };
            if count == 0 {
                return Err(ChemistryError::invalid_formula(
                    formula,
                    format!("zero count for {}", element),
                ));
            }

            parts.push((element, count));
        }

        Ok(parts)
    }
}

impl MolecularWeightSource for FormulaWeights {
    fn molecular_weight(&self, molecule: &str) -> ChemistryResult<f64> {
        if let Some(weight) = self.overrides.get(molecule) {
            return Ok(*weight);
        }

        let weight = Self::parse_formula(molecule)?
            .into_iter()
            .map(|(element, count)| element.atomic_mass() * count as f64)
            .sum();
        Ok(weight)
    }
}

/// Convert a volume mixing-ratio profile into a mass-fraction profile.
///
/// `mu_profile` is the mean molecular weight per layer in g/mol.
pub fn mass_fraction_profile(
    weights: &dyn MolecularWeightSource,
    molecule: &str,
    mix_profile: &[f64],
    mu_profile: &[f64],
) -> ChemistryResult<Vec<f64>> {
    if mix_profile.len() != mu_profile.len() {
        return Err(ChemistryError::ProfileMismatch {
            mix: mix_profile.len(),
            mu: mu_profile.len(),
        });
    }

    let weight = weights.molecular_weight(molecule)?;
    Ok(mix_profile
        .iter()
        .zip(mu_profile)
        .map(|(mix, mu)| weight * mix / mu)
        .collect())
}
