//! Molecular opacity tables for radiative transfer.
//!
//! This crate locates petitRADTRANS-style opacity folders on disk, decodes
//! them into dense cross-section grids and answers interpolation queries at
//! arbitrary (pressure, temperature) points.
//!
//! # Architecture
//!
//! ```text
//! OpacityConfig
//!      │
//!      ▼
//! MoleculeCatalog::discover      one folder per molecule (main_iso > all_iso > bare)
//!      │
//!      ▼
//! SampleIndex::scan              sigma_<label>_<T>K_<P>bar.dat → P/T axes
//!      │
//!      ├─► load_line_by_line     wlen.dat + raw f64 samples      → [P][T][W]
//!      │
//!      └─► load_correlated_k     kappa_g_info.dat + record files → [P][T][W][16]
//!               │
//!               ▼
//!          OpacityTable::cross_section_at(pressure, temperature)
//! ```
//!
//! Tables are immutable once built and can be shared between threads.
//!
//! # Example
//!
//! ```ignore
//! use opacity_common::FormulaWeights;
//! use opacity_table::{load_species, OpacityConfig, OpacityFormat};
//!
//! let mut config = OpacityConfig::new("/data/input_data/opacities", OpacityFormat::CorrelatedK);
//! config.species = vec!["H2O".into(), "CO".into()];
//!
//! let weights = FormulaWeights::new();
//! let tables = load_species(&config, &weights)?;
//! let sigma = tables["H2O"].cross_section_at(1e5, 1200.0);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod grid;
pub mod indexer;
pub mod interpolation;
pub mod loader;
pub mod quadrature;
pub mod species;
pub mod table;
pub mod types;

pub use config::OpacityConfig;
pub use discovery::MoleculeCatalog;
pub use error::{OpacityError, Result};
pub use grid::CrossSectionGrid;
pub use indexer::{AxisGrid, SampleFile, SampleIndex};
pub use interpolation::{Boundary, ClampReport};
pub use loader::{load_correlated_k, load_line_by_line};
pub use quadrature::{quadrature_weights, G_POINTS};
pub use species::{load_molecule, load_species};
pub use table::{OpacitySample, OpacityTable, TableSummary};
pub use types::{InterpolationMode, IsotopeTier, LoaderFn, MoleculeEntry, OpacityFormat};
