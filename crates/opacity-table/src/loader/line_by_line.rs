//! Line-by-line cross sections.
//!
//! `wlen.dat` and every sample file are raw `f64` arrays in ascending
//! wavelength order. Both are reversed so the spectrum axis runs in
//! ascending wavenumber.

use opacity_common::{wavelength_cm_to_wavenumber, MolecularWeightSource};
use tracing::{debug, info};
use xsec_parser::decode_f64_array;

use crate::config::OpacityConfig;
use crate::error::{OpacityError, Result};
use crate::grid::CrossSectionGrid;
use crate::table::{OpacityTable, TableParts};
use crate::types::{MoleculeEntry, OpacityFormat};

use super::{ensure_complete, index_samples, normalization, read_bytes, sample_cell};

/// Wavelength grid shared by all samples of a molecule (cm).
pub const WAVELENGTH_FILE: &str = "wlen.dat";

/// Load a line-by-line table.
pub fn load_line_by_line(
    entry: &MoleculeEntry,
    config: &OpacityConfig,
    weights: &dyn MolecularWeightSource,
) -> Result<OpacityTable> {
    let folder = entry.path();
    info!(molecule = %entry.name, path = %folder.display(), "Loading line-by-line opacity");

    let index = index_samples(folder, &config.sample_extension)?;

    let wlen_path = folder.join(WAVELENGTH_FILE);
    let wavelengths = decode_f64_array(&read_bytes(&wlen_path)?)
        .map_err(|e| OpacityError::from_parse(&wlen_path, e))?;
    if wavelengths.is_empty() {
        return Err(OpacityError::format_mismatch(&wlen_path, "empty wavelength grid"));
    }
    let wavenumbers: Vec<f64> = wavelengths
        .iter()
        .rev()
        .map(|w| wavelength_cm_to_wavenumber(*w))
        .collect();

    let num_molecules = normalization(&entry.name, weights)?;

    let mut grid = CrossSectionGrid::new(
        index.pressures().len(),
        index.temperatures().len(),
        wavenumbers.len(),
        1,
    );

    for sample in index.samples() {
        let (p, t) = sample_cell(&index, sample)?;
        let raw = decode_f64_array(&read_bytes(&sample.path)?)
            .map_err(|e| OpacityError::from_parse(&sample.path, e))?;

        if raw.len() != wavenumbers.len() {
            return Err(OpacityError::format_mismatch(
                &sample.path,
                format!(
                    "{} values but the wavelength grid has {}",
                    raw.len(),
                    wavenumbers.len()
                ),
            ));
        }

        for (dst, src) in grid.slab_mut(p, t).iter_mut().zip(raw.iter().rev()) {
            *dst = src / num_molecules;
        }

        debug!(
            pressure = sample.pressure,
            temperature = sample.temperature,
            path = %sample.path.display(),
            "Loaded line-by-line sample"
        );
    }

    ensure_complete(&entry.name, &grid)?;

    info!(
        molecule = %entry.name,
        pressures = index.pressures().len(),
        temperatures = index.temperatures().len(),
        wavenumbers = wavenumbers.len(),
        "Line-by-line opacity loaded"
    );

    OpacityTable::from_parts(TableParts {
        molecule: entry.name.clone(),
        format: OpacityFormat::LineByLine,
        source_path: folder.to_path_buf(),
        pressures: index.pressures().clone(),
        temperatures: index.temperatures().clone(),
        wavenumbers,
        grid,
        quadrature_weights: None,
        interpolation: config.interpolation,
    })
}
