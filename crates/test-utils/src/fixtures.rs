//! On-disk opacity trees for integration tests.
//!
//! Layout written by [`OpacityFixture`]:
//!
//! ```text
//! <root>/lines/line_by_line/<folder>/wlen.dat
//! <root>/lines/line_by_line/<folder>/sigma_<label>_<T>K_<P>bar.dat
//! <root>/lines/corr_k/<folder>/kappa_g_info.dat
//! <root>/lines/corr_k/<folder>/sigma_<label>_<T>K_<P>bar.dat
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xsec_parser::{encode_f64_array, encode_record_stream, SampleFilename};

use crate::paths::temp_test_dir_with_prefix;

/// Default sample extension.
pub const SAMPLE_EXTENSION: &str = "dat";

/// Temporary opacity root, removed on drop.
pub struct OpacityFixture {
    dir: TempDir,
}

impl Default for OpacityFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl OpacityFixture {
    pub fn new() -> Self {
        Self {
            dir: temp_test_dir_with_prefix("opacities_"),
        }
    }

    /// Directory to use as the opacity root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `<root>/lines/line_by_line/<folder>`, created if missing.
    pub fn line_by_line_dir(&self, folder: &str) -> PathBuf {
        self.folder("line_by_line", folder)
    }

    /// `<root>/lines/corr_k/<folder>`, created if missing.
    pub fn corr_k_dir(&self, folder: &str) -> PathBuf {
        self.folder("corr_k", folder)
    }

    fn folder(&self, format_dir: &str, folder: &str) -> PathBuf {
        let dir = self.root().join("lines").join(format_dir).join(folder);
        fs::create_dir_all(&dir).expect("Failed to create fixture folder");
        dir
    }

    /// Write `wlen.dat` for a line-by-line folder.
    pub fn write_wavelengths(&self, folder: &str, wavelengths_cm: &[f64]) -> PathBuf {
        let path = self.line_by_line_dir(folder).join("wlen.dat");
        write_file(&path, &encode_f64_array(wavelengths_cm));
        path
    }

    /// Write one raw line-by-line sample.
    pub fn write_line_by_line_sample(
        &self,
        folder: &str,
        temperature: f64,
        pressure_bar: f64,
        values: &[f64],
    ) -> PathBuf {
        let name = sample_name(folder, temperature, pressure_bar);
        let path = self.line_by_line_dir(folder).join(name);
        write_file(&path, &encode_f64_array(values));
        path
    }

    /// Write `kappa_g_info.dat` with a title line and one row per frequency.
    pub fn write_kappa_info(&self, folder: &str, frequencies_hz: &[f64]) -> PathBuf {
        let path = self.corr_k_dir(folder).join("kappa_g_info.dat");
        let mut text = String::from("# frequency [Hz]   bin width   lower edge   upper edge\n");
        for f in frequencies_hz {
            text.push_str(&format!("{:e} 1.0 0.0 0.0\n", f));
        }
        write_file(&path, text.as_bytes());
        path
    }

    /// Write one record-framed correlated-k sample, `[bins][16]` row-major.
    pub fn write_corr_k_sample(
        &self,
        folder: &str,
        temperature: f64,
        pressure_bar: f64,
        values: &[f64],
    ) -> PathBuf {
        let name = sample_name(folder, temperature, pressure_bar);
        let path = self.corr_k_dir(folder).join(name);
        write_file(&path, &encode_record_stream(values));
        path
    }

    /// Write arbitrary bytes to a file inside a folder.
    pub fn write_raw(&self, dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        write_file(&path, bytes);
        path
    }
}

/// `sigma_<label>_<T>K_<P>bar.dat`, with the label taken from the folder.
pub fn sample_name(folder: &str, temperature: f64, pressure_bar: f64) -> String {
    let label = folder.split("_main_iso").next().unwrap_or(folder);
    let label = label.split("_all_iso").next().unwrap_or(label);
    SampleFilename {
        label: label.to_string(),
        temperature,
        pressure_bar,
    }
    .file_name(SAMPLE_EXTENSION)
}

fn write_file(path: &Path, bytes: &[u8]) {
    fs::write(path, bytes).expect("Failed to write fixture file");
}
