//! Decoders turning an indexed molecule folder into an [`OpacityTable`].
//!
//! [`OpacityTable`]: crate::table::OpacityTable

pub mod correlated_k;
pub mod line_by_line;

use std::path::Path;

use opacity_common::{molecules_per_gram, MolecularWeightSource};

use crate::error::{OpacityError, Result};
use crate::grid::CrossSectionGrid;
use crate::indexer::{SampleFile, SampleIndex};

pub use correlated_k::{load_correlated_k, KAPPA_INFO_FILE};
pub use line_by_line::{load_line_by_line, WAVELENGTH_FILE};

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| OpacityError::io(path, e))
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| OpacityError::io(path, e))
}

/// Index the folder, failing when it has no usable samples.
pub(crate) fn index_samples(folder: &Path, extension: &str) -> Result<SampleIndex> {
    let index = SampleIndex::scan(folder, extension)?;
    if index.is_empty() {
        return Err(OpacityError::NoSamples(folder.to_path_buf()));
    }
    Ok(index)
}

/// Molecules per gram, from the shared molecular-weight source.
pub(crate) fn normalization(molecule: &str, weights: &dyn MolecularWeightSource) -> Result<f64> {
    Ok(molecules_per_gram(weights.molecular_weight(molecule)?))
}

pub(crate) fn sample_cell(index: &SampleIndex, sample: &SampleFile) -> Result<(usize, usize)> {
    index.cell(sample).ok_or_else(|| {
        OpacityError::format_mismatch(&sample.path, "sample is not on the indexed axes")
    })
}

/// Every (pressure, temperature) cell must hold a sample.
pub(crate) fn ensure_complete(molecule: &str, grid: &CrossSectionGrid) -> Result<()> {
    let missing = grid.missing_cells();
    if missing > 0 {
        return Err(OpacityError::IncompleteGrid {
            molecule: molecule.to_string(),
            missing,
            expected: grid.cell_count(),
        });
    }
    Ok(())
}
