//! Unit conversions used by the opacity datasets.
//!
//! Wavenumbers are always expressed in cm⁻¹.

use crate::constants::{AVOGADRO, BAR_TO_PA, SPEED_OF_LIGHT};

/// Micrometres per centimetre.
const UM_PER_CM: f64 = 1e4;

/// Convert a pressure in bar to Pa.
pub fn pressure_bar_to_pa(bar: f64) -> f64 {
    bar * BAR_TO_PA
}

/// Convert a wavelength in cm (the unit of `wlen.dat`) to a wavenumber.
pub fn wavelength_cm_to_wavenumber(wavelength_cm: f64) -> f64 {
    UM_PER_CM / (wavelength_cm * UM_PER_CM)
}

/// Convert a frequency in Hz (the first column of `kappa_g_info.dat`) to a wavenumber.
pub fn frequency_to_wavenumber(frequency_hz: f64) -> f64 {
    let wavelength_um = SPEED_OF_LIGHT / frequency_hz * 1e6;
    UM_PER_CM / wavelength_um
}

/// Number of molecules in one gram of a species with the given molecular weight (g/mol).
///
/// Dividing a per-gram opacity by this value yields a per-molecule cross section.
pub fn molecules_per_gram(molecular_weight: f64) -> f64 {
    (1.0 / molecular_weight) * AVOGADRO
}
