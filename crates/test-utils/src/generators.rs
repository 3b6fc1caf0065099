//! Synthetic spectra with predictable values.
//!
//! Values are chosen so a test can tell at a glance which sample, wavenumber
//! bin and g-point a number came from.

/// Wavelength grid in cm, ascending: `start, start + step, ...`.
pub fn wavelength_grid(len: usize, start_cm: f64, step_cm: f64) -> Vec<f64> {
    (0..len).map(|i| start_cm + step_cm * i as f64).collect()
}

/// Spectrum `[offset, offset + 1, ...]` in native file order.
///
/// ```
/// use test_utils::ramp_spectrum;
///
/// assert_eq!(ramp_spectrum(3, 10.0), vec![10.0, 11.0, 12.0]);
/// ```
pub fn ramp_spectrum(len: usize, offset: f64) -> Vec<f64> {
    (0..len).map(|i| offset + i as f64).collect()
}

/// Row-major `[bins][g_points]` block where value = `offset + 100 * bin + g`.
///
/// ```
/// use test_utils::g_point_block;
///
/// let block = g_point_block(2, 16, 0.0);
/// assert_eq!(block[17], 101.0); // bin 1, g-point 1
/// ```
pub fn g_point_block(bins: usize, g_points: usize, offset: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(bins * g_points);
    for bin in 0..bins {
        for g in 0..g_points {
            data.push(offset + (100 * bin + g) as f64);
        }
    }
    data
}

/// Frequencies in Hz, descending like a native `kappa_g_info.dat`.
pub fn descending_frequencies(len: usize, highest_hz: f64, step_hz: f64) -> Vec<f64> {
    (0..len).map(|i| highest_hz - step_hz * i as f64).collect()
}
