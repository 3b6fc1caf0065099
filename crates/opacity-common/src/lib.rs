//! Common types and utilities shared across the opacity crates.
//!
//! Anything that must agree between the opacity tables and the chemistry
//! layer lives here: physical constants, the wavelength/wavenumber
//! conversions used by the on-disk datasets, and the molecular-weight
//! table used to turn per-mass opacities into per-molecule cross sections.

pub mod chemistry;
pub mod constants;
pub mod error;
pub mod units;

pub use chemistry::{mass_fraction_profile, Element, FormulaWeights, MolecularWeightSource};
pub use constants::{AVOGADRO, BAR_TO_PA, SPEED_OF_LIGHT};
pub use error::{ChemistryError, ChemistryResult};
pub use units::{
    frequency_to_wavenumber, molecules_per_gram, pressure_bar_to_pa, wavelength_cm_to_wavenumber,
};
