//! Building the tables for every active species of a forward model.

use std::collections::BTreeMap;

use opacity_common::MolecularWeightSource;
use rayon::prelude::*;
use tracing::info;

use crate::config::OpacityConfig;
use crate::discovery::MoleculeCatalog;
use crate::error::Result;
use crate::table::OpacityTable;

/// Discover and load one molecule.
pub fn load_molecule(
    config: &OpacityConfig,
    weights: &dyn MolecularWeightSource,
    molecule: &str,
) -> Result<OpacityTable> {
    let catalog = MoleculeCatalog::discover(config)?;
    let entry = catalog.resolve(molecule)?;
    config.method.load(entry, config, weights)
}

/// Load every species listed in the configuration.
///
/// Molecules are built in parallel; each molecule's own construction stays
/// on one thread. Any failure aborts the whole load.
pub fn load_species(
    config: &OpacityConfig,
    weights: &dyn MolecularWeightSource,
) -> Result<BTreeMap<String, OpacityTable>> {
    config.validate()?;
    let catalog = MoleculeCatalog::discover(config)?;

    let entries = config
        .species
        .iter()
        .map(|name| catalog.resolve(name).cloned())
        .collect::<Result<Vec<_>>>()?;

    let tables = entries
        .par_iter()
        .map(|entry| {
            config
                .method
                .load(entry, config, weights)
                .map(|table| (entry.name.clone(), table))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    info!(
        format = %config.method,
        species = tables.len(),
        "Opacity tables ready"
    );

    Ok(tables)
}
