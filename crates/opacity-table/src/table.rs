//! Opacity tables and the (pressure, temperature) query contract.
//!
//! Both on-disk formats produce the same [`OpacityTable`]. A query returns
//! the full spectrum at one (pressure, temperature) point, blended from the
//! bracketing samples independently for every wavenumber and g-point.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{OpacityError, Result};
use crate::grid::CrossSectionGrid;
use crate::indexer::AxisGrid;
use crate::interpolation::{bracket, exp_interp, lerp, Bracket, ClampReport};
use crate::quadrature::G_POINTS;
use crate::types::{InterpolationMode, OpacityFormat};

/// Everything a loader hands over to build a table.
#[derive(Debug, Clone)]
pub(crate) struct TableParts {
    pub molecule: String,
    pub format: OpacityFormat,
    pub source_path: PathBuf,
    pub pressures: AxisGrid,
    pub temperatures: AxisGrid,
    pub wavenumbers: Vec<f64>,
    pub grid: CrossSectionGrid,
    pub quadrature_weights: Option<[f64; G_POINTS]>,
    pub interpolation: InterpolationMode,
}

/// Spectrum returned by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacitySample {
    /// `[W]` or `[W][G]` row-major cross sections.
    pub values: Vec<f64>,
    pub g_points: usize,
    /// Axes on which the query was clamped to the sampled range.
    pub clamp: ClampReport,
}

impl OpacitySample {
    /// The g-point values of one wavenumber bin.
    ///
    /// # Panics
    ///
    /// Panics if `wavenumber_index` is not below the number of wavenumber bins.
    pub fn bin(&self, wavenumber_index: usize) -> &[f64] {
        let start = wavenumber_index * self.g_points;
        &self.values[start..start + self.g_points]
    }
}

/// Immutable cross-section table of one molecule.
#[derive(Debug, Clone)]
pub struct OpacityTable {
    molecule: String,
    format: OpacityFormat,
    source_path: PathBuf,
    pressures: AxisGrid,
    temperatures: AxisGrid,
    wavenumbers: Vec<f64>,
    grid: CrossSectionGrid,
    quadrature_weights: Option<[f64; G_POINTS]>,
    interpolation: InterpolationMode,
}

impl OpacityTable {
    pub(crate) fn from_parts(parts: TableParts) -> Result<Self> {
        let mismatch = |reason: String| OpacityError::format_mismatch(&parts.source_path, reason);
        let (p, t, w, g) = parts.grid.shape();

        if parts.pressures.is_empty() || parts.temperatures.is_empty() {
            return Err(OpacityError::NoSamples(parts.source_path.clone()));
        }
        if (p, t) != (parts.pressures.len(), parts.temperatures.len()) {
            return Err(mismatch(format!(
                "grid has {}x{} cells but axes have {}x{} samples",
                p,
                t,
                parts.pressures.len(),
                parts.temperatures.len()
            )));
        }
        if w != parts.wavenumbers.len() {
            return Err(mismatch(format!(
                "grid has {} wavenumber bins but the wavenumber grid has {}",
                w,
                parts.wavenumbers.len()
            )));
        }
        let expected_g = match parts.format {
            OpacityFormat::LineByLine => 1,
            OpacityFormat::CorrelatedK => G_POINTS,
        };
        if g != expected_g || parts.quadrature_weights.is_some() != (g == G_POINTS) {
            return Err(mismatch(format!(
                "{} table cannot have {} g-points",
                parts.format, g
            )));
        }

        Ok(Self {
            molecule: parts.molecule,
            format: parts.format,
            source_path: parts.source_path,
            pressures: parts.pressures,
            temperatures: parts.temperatures,
            wavenumbers: parts.wavenumbers,
            grid: parts.grid,
            quadrature_weights: parts.quadrature_weights,
            interpolation: parts.interpolation,
        })
    }

    /// Cross sections at (pressure [Pa], temperature [K]) for every wavenumber.
    ///
    /// Correlated-k tables return `[W][16]` row-major values.
    pub fn cross_section_at(&self, pressure: f64, temperature: f64) -> Vec<f64> {
        self.sample(pressure, temperature).values
    }

    /// Like [`Self::cross_section_at`], also reporting boundary clamping.
    pub fn sample(&self, pressure: f64, temperature: f64) -> OpacitySample {
        let pb = bracket(self.pressures.values(), pressure);
        let tb = bracket(self.temperatures.values(), temperature);
        let clamp = ClampReport {
            pressure: pb.clamped,
            temperature: tb.clamped,
        };

        if clamp.is_clamped() {
            debug!(
                molecule = %self.molecule,
                pressure,
                temperature,
                clamped_pressure = self.pressures.values()[pb.lower],
                clamped_temperature = self.temperatures.values()[tb.lower],
                ?clamp,
                "Query outside sampled range, clamped to boundary"
            );
        }

        let lower = self.blend_temperature(pb.lower, &tb, temperature);
        let values = if pb.is_direct() {
            lower
        } else {
            let upper = self.blend_temperature(pb.upper, &tb, temperature);
            lower
                .iter()
                .zip(&upper)
                .map(|(a, b)| lerp(*a, *b, pb.weight))
                .collect()
        };

        OpacitySample {
            values,
            g_points: self.grid.g_points(),
            clamp,
        }
    }

    /// Temperature-blended slab at one pressure index.
    fn blend_temperature(&self, p: usize, tb: &Bracket, temperature: f64) -> Vec<f64> {
        let lower = self.grid.slab(p, tb.lower);
        if tb.is_direct() {
            return lower.to_vec();
        }
        let upper = self.grid.slab(p, tb.upper);

        match self.interpolation {
            InterpolationMode::Linear => lower
                .iter()
                .zip(upper)
                .map(|(a, b)| lerp(*a, *b, tb.weight))
                .collect(),
            InterpolationMode::Exponential => {
                let t_min = self.temperatures.values()[tb.lower];
                let t_max = self.temperatures.values()[tb.upper];
                lower
                    .iter()
                    .zip(upper)
                    .map(|(a, b)| exp_interp(*a, *b, temperature, t_min, t_max))
                    .collect()
            }
        }
    }

    /// Index range of wavenumbers inside `[wn_min, wn_max]` (cm⁻¹).
    pub fn spectral_window(&self, wn_min: f64, wn_max: f64) -> Range<usize> {
        let start = self.wavenumbers.partition_point(|w| *w < wn_min);
        let end = self.wavenumbers.partition_point(|w| *w <= wn_max);
        start..end.max(start)
    }

    /// Cross sections restricted to a wavenumber band.
    pub fn cross_section_in_window(
        &self,
        pressure: f64,
        temperature: f64,
        wn_min: f64,
        wn_max: f64,
    ) -> Vec<f64> {
        let window = self.spectral_window(wn_min, wn_max);
        let g = self.grid.g_points();
        let mut values = self.cross_section_at(pressure, temperature);
        values.truncate(window.end * g);
        values.drain(..window.start * g);
        values
    }

    pub fn molecule_name(&self) -> &str {
        &self.molecule
    }

    pub fn format(&self) -> OpacityFormat {
        self.format
    }

    /// Folder the table was loaded from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Ascending wavenumbers (cm⁻¹) matching the spectrum axis.
    pub fn wavenumber_grid(&self) -> &[f64] {
        &self.wavenumbers
    }

    /// Pressure samples (Pa).
    pub fn pressure_grid(&self) -> &[f64] {
        self.pressures.values()
    }

    /// Temperature samples (K).
    pub fn temperature_grid(&self) -> &[f64] {
        self.temperatures.values()
    }

    /// g-point weights; `None` for line-by-line tables.
    pub fn quadrature_weights(&self) -> Option<&[f64; G_POINTS]> {
        self.quadrature_weights.as_ref()
    }

    pub fn g_points(&self) -> usize {
        self.grid.g_points()
    }

    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Raw normalized grid.
    pub fn grid(&self) -> &CrossSectionGrid {
        &self.grid
    }

    pub fn min_pressure(&self) -> f64 {
        self.pressures.values()[0]
    }

    pub fn max_pressure(&self) -> f64 {
        self.pressures.values()[self.pressures.len() - 1]
    }

    pub fn min_temperature(&self) -> f64 {
        self.temperatures.values()[0]
    }

    pub fn max_temperature(&self) -> f64 {
        self.temperatures.values()[self.temperatures.len() - 1]
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            molecule: self.molecule.clone(),
            format: self.format,
            source_path: self.source_path.display().to_string(),
            pressures: self.pressures.len(),
            pressure_range: (self.min_pressure(), self.max_pressure()),
            temperatures: self.temperatures.len(),
            temperature_range: (self.min_temperature(), self.max_temperature()),
            wavenumbers: self.wavenumbers.len(),
            wavenumber_range: self
                .wavenumbers
                .first()
                .zip(self.wavenumbers.last())
                .map(|(a, b)| (*a, *b)),
            g_points: self.grid.g_points(),
            interpolation: self.interpolation,
        }
    }
}

/// Shape and extent of a loaded table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub molecule: String,
    pub format: OpacityFormat,
    pub source_path: String,
    pub pressures: usize,
    pub pressure_range: (f64, f64),
    pub temperatures: usize,
    pub temperature_range: (f64, f64),
    pub wavenumbers: usize,
    pub wavenumber_range: Option<(f64, f64)>,
    pub g_points: usize,
    pub interpolation: InterpolationMode,
}
