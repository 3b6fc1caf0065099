//! Sample indexing: file names to (pressure, temperature) axes.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use opacity_common::pressure_bar_to_pa;
use tracing::{debug, warn};
use walkdir::WalkDir;
use xsec_parser::SampleFilename;

use crate::discovery::is_dangling_link;
use crate::error::{OpacityError, Result};

/// Strictly increasing, deduplicated sample coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisGrid(Vec<f64>);

impl AxisGrid {
    /// Build an axis from unordered sample values.
    pub fn from_samples(values: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.into_iter().collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Index of an exact sample value.
    pub fn position(&self, value: f64) -> Option<usize> {
        self.0
            .binary_search_by(|probe| probe.total_cmp(&value))
            .ok()
    }
}

/// One sample file and the grid point it supplies.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFile {
    /// Pressure in Pa.
    pub pressure: f64,
    /// Temperature in K.
    pub temperature: f64,
    pub label: String,
    pub path: PathBuf,
}

/// Pressure and temperature axes of a molecule folder plus the file for each point.
#[derive(Debug, Clone, Default)]
pub struct SampleIndex {
    pressures: AxisGrid,
    temperatures: AxisGrid,
    samples: Vec<SampleFile>,
}

impl SampleIndex {
    /// Index every sample file directly inside `dir`.
    pub fn scan(dir: &Path, extension: &str) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_dangling_link(&e) => {
                    warn!(path = ?e.path(), "Skipping dangling symlink");
                    continue;
                }
                Err(e) => return Err(OpacityError::io(dir, e.into())),
            };
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            }
        }
        Ok(Self::from_paths(paths, extension))
    }

    /// Index a list of paths; names that do not match the sample pattern are skipped.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>, extension: &str) -> Self {
        let mut samples: Vec<SampleFile> = paths
            .into_iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?;
                match SampleFilename::parse(name, extension) {
                    Ok(parsed) => Some(SampleFile {
                        pressure: pressure_bar_to_pa(parsed.pressure_bar),
                        temperature: parsed.temperature,
                        label: parsed.label,
                        path,
                    }),
                    Err(e) => {
                        debug!(error = %e, "Skipping non-sample file");
                        None
                    }
                }
            })
            .collect();

        samples.sort_by(|a, b| {
            a.pressure
                .total_cmp(&b.pressure)
                .then(a.temperature.total_cmp(&b.temperature))
                .then_with(|| a.path.cmp(&b.path))
        });

        // Later files replace earlier ones at the same grid point.
        let mut unique: Vec<SampleFile> = Vec::with_capacity(samples.len());
        for sample in samples {
            match unique.last_mut() {
                Some(last) if same_point(last, &sample) => {
                    warn!(
                        pressure = sample.pressure,
                        temperature = sample.temperature,
                        replaced = %last.path.display(),
                        kept = %sample.path.display(),
                        "Duplicate sample for grid point"
                    );
                    *last = sample;
                }
                _ => unique.push(sample),
            }
        }

        let pressures = AxisGrid::from_samples(unique.iter().map(|s| s.pressure));
        let temperatures = AxisGrid::from_samples(unique.iter().map(|s| s.temperature));

        Self {
            pressures,
            temperatures,
            samples: unique,
        }
    }

    /// Pressure axis in Pa.
    pub fn pressures(&self) -> &AxisGrid {
        &self.pressures
    }

    /// Temperature axis in K.
    pub fn temperatures(&self) -> &AxisGrid {
        &self.temperatures
    }

    /// Samples sorted by (pressure, temperature).
    pub fn samples(&self) -> &[SampleFile] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of (pressure, temperature) cells the axes span.
    pub fn cell_count(&self) -> usize {
        self.pressures.len() * self.temperatures.len()
    }

    /// Axis indices of a sample.
    pub fn cell(&self, sample: &SampleFile) -> Option<(usize, usize)> {
        Some((
            self.pressures.position(sample.pressure)?,
            self.temperatures.position(sample.temperature)?,
        ))
    }

    /// File supplying the exact grid point, if any.
    pub fn lookup(&self, pressure: f64, temperature: f64) -> Option<&Path> {
        self.samples
            .binary_search_by(|s| {
                s.pressure
                    .total_cmp(&pressure)
                    .then(s.temperature.total_cmp(&temperature))
            })
            .ok()
            .map(|i| self.samples[i].path.as_path())
    }
}

fn same_point(a: &SampleFile, b: &SampleFile) -> bool {
    a.pressure.total_cmp(&b.pressure) == Ordering::Equal
        && a.temperature.total_cmp(&b.temperature) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/mol").join(n)).collect()
    }

    #[test]
    fn test_axis_from_samples() {
        let axis = AxisGrid::from_samples([3.0, 1.0, 2.0, 1.0, 3.0]);
        assert_eq!(axis.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(axis.position(2.0), Some(1));
        assert_eq!(axis.position(2.5), None);
        assert_eq!(axis.min(), Some(1.0));
        assert_eq!(axis.max(), Some(3.0));
    }

    #[test]
    fn test_index_converts_pressure_to_pa() {
        let index = SampleIndex::from_paths(
            paths(&[
                "sigma_01_300K_0.1bar.dat",
                "sigma_01_300K_10bar.dat",
                "sigma_01_500K_0.1bar.dat",
                "sigma_01_500K_10bar.dat",
            ]),
            "dat",
        );
        assert_eq!(index.pressures().values(), &[1e4, 1e6]);
        assert_eq!(index.temperatures().values(), &[300.0, 500.0]);
        assert_eq!(index.samples().len(), 4);
        assert_eq!(index.cell_count(), 4);
        assert_eq!(
            index.lookup(1e6, 300.0),
            Some(Path::new("/mol/sigma_01_300K_10bar.dat"))
        );
        assert_eq!(index.lookup(1e5, 300.0), None);
    }

    #[test]
    fn test_index_skips_non_matching() {
        let index = SampleIndex::from_paths(
            paths(&["wlen.dat", "kappa_g_info.dat", "notes.txt", "sigma_01_300K_1bar.dat"]),
            "dat",
        );
        assert_eq!(index.samples().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_samples() {
        let dir = tempfile::tempdir().unwrap();
        let store = tempfile::tempdir().unwrap();
        let target = store.path().join("payload.bin");
        std::fs::write(&target, [0u8; 8]).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("sigma_CO_300K_1bar.dat")).unwrap();
        let dangling = dir.path().join("sigma_CO_600K_1bar.dat");
        std::os::unix::fs::symlink(store.path().join("gone"), dangling).unwrap();

        let index = SampleIndex::scan(dir.path(), "dat").unwrap();
        assert_eq!(index.samples().len(), 1);
        assert_eq!(index.temperatures().values(), &[300.0]);
        assert_eq!(index.samples()[0].path, dir.path().join("sigma_CO_300K_1bar.dat"));
    }

    #[test]
    fn test_empty_index() {
        let index = SampleIndex::from_paths(paths(&["wlen.dat"]), "dat");
        assert!(index.is_empty());
        assert!(index.pressures().is_empty());
        assert!(index.temperatures().is_empty());
    }

    #[test]
    fn test_samples_sorted_by_pressure_then_temperature() {
        let index = SampleIndex::from_paths(
            paths(&[
                "sigma_01_500K_10bar.dat",
                "sigma_01_300K_10bar.dat",
                "sigma_01_500K_0.1bar.dat",
                "sigma_01_300K_0.1bar.dat",
            ]),
            "dat",
        );
        let points: Vec<(f64, f64)> = index
            .samples()
            .iter()
            .map(|s| (s.pressure, s.temperature))
            .collect();
        assert_eq!(
            points,
            vec![(1e4, 300.0), (1e4, 500.0), (1e6, 300.0), (1e6, 500.0)]
        );
    }

    #[test]
    fn test_duplicate_point_keeps_last_path() {
        let index = SampleIndex::from_paths(
            paths(&["sigma_b_300K_1bar.dat", "sigma_a_300K_1bar.dat"]),
            "dat",
        );
        assert_eq!(index.samples().len(), 1);
        assert_eq!(index.samples()[0].label, "b");
    }
}
