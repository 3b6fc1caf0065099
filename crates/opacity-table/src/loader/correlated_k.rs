//! Correlated-k tables.
//!
//! Two independent reversals happen here:
//!
//! - the `kappa_g_info.dat` frequency column is reversed to give an
//!   ascending wavenumber grid;
//! - the assembled grid is reversed along its wavenumber axis once all
//!   samples are in, because the record streams are filled in the opposite
//!   order to the header.

use opacity_common::{frequency_to_wavenumber, MolecularWeightSource};
use tracing::{debug, info};
use xsec_parser::{decode_g_point_rows, parse_kappa_g_info};

use crate::config::OpacityConfig;
use crate::error::{OpacityError, Result};
use crate::grid::CrossSectionGrid;
use crate::quadrature::{quadrature_weights, G_POINTS};
use crate::table::{OpacityTable, TableParts};
use crate::types::{MoleculeEntry, OpacityFormat};

use super::{ensure_complete, index_samples, normalization, read_bytes, read_text, sample_cell};

/// Per-folder header listing the wavenumber bins.
pub const KAPPA_INFO_FILE: &str = "kappa_g_info.dat";

/// Ascending wavenumber grid from the header's native frequency column.
pub fn header_wavenumbers(frequencies: &[f64]) -> Vec<f64> {
    frequencies
        .iter()
        .rev()
        .map(|f| frequency_to_wavenumber(*f))
        .collect()
}

/// Load a correlated-k table.
pub fn load_correlated_k(
    entry: &MoleculeEntry,
    config: &OpacityConfig,
    weights: &dyn MolecularWeightSource,
) -> Result<OpacityTable> {
    let folder = entry.path();
    info!(molecule = %entry.name, path = %folder.display(), "Loading correlated-k opacity");

    let index = index_samples(folder, &config.sample_extension)?;

    let info_path = folder.join(KAPPA_INFO_FILE);
    let header = parse_kappa_g_info(&read_text(&info_path)?)
        .map_err(|e| OpacityError::from_parse(&info_path, e))?;
    if header.is_empty() {
        return Err(OpacityError::format_mismatch(&info_path, "no wavenumber bins"));
    }
    let wavenumbers = header_wavenumbers(&header.frequencies);

    let mut grid = CrossSectionGrid::new(
        index.pressures().len(),
        index.temperatures().len(),
        wavenumbers.len(),
        G_POINTS,
    );

    for sample in index.samples() {
        let (p, t) = sample_cell(&index, sample)?;
        let rows = decode_g_point_rows(&read_bytes(&sample.path)?, G_POINTS)
            .map_err(|e| OpacityError::from_parse(&sample.path, e))?;

        if rows.rows() != wavenumbers.len() {
            return Err(OpacityError::format_mismatch(
                &sample.path,
                format!(
                    "{} wavenumber rows but {} lists {}",
                    rows.rows(),
                    KAPPA_INFO_FILE,
                    wavenumbers.len()
                ),
            ));
        }

        grid.slab_mut(p, t).copy_from_slice(rows.as_slice());

        debug!(
            pressure = sample.pressure,
            temperature = sample.temperature,
            rows = rows.rows(),
            path = %sample.path.display(),
            "Loaded correlated-k sample"
        );
    }

    ensure_complete(&entry.name, &grid)?;

    grid.reverse_wavenumber_axis();
    grid.divide_by(normalization(&entry.name, weights)?);

    info!(
        molecule = %entry.name,
        pressures = index.pressures().len(),
        temperatures = index.temperatures().len(),
        wavenumbers = wavenumbers.len(),
        g_points = G_POINTS,
        "Correlated-k opacity loaded"
    );

    OpacityTable::from_parts(TableParts {
        molecule: entry.name.clone(),
        format: OpacityFormat::CorrelatedK,
        source_path: folder.to_path_buf(),
        pressures: index.pressures().clone(),
        temperatures: index.temperatures().clone(),
        wavenumbers,
        grid,
        quadrature_weights: Some(quadrature_weights()),
        interpolation: config.interpolation,
    })
}
