//! Physical constants.

/// Avogadro's number (molecules per mole), as used by the opacity datasets.
pub const AVOGADRO: f64 = 6.0221409e23;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Pascals per bar.
pub const BAR_TO_PA: f64 = 1e5;
