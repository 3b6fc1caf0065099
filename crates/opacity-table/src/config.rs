//! Configuration for opacity discovery and loading.
//!
//! The configuration is always passed explicitly; nothing here reads
//! process-wide state except [`OpacityConfig::from_env`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OpacityError, Result};
use crate::types::{InterpolationMode, OpacityFormat};

/// Configuration for opacity discovery and loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityConfig {
    /// Directory containing `lines/line_by_line` and `lines/corr_k`.
    pub opacity_root: PathBuf,

    /// Which on-disk representation to load.
    pub method: OpacityFormat,

    /// Interpolation along the temperature axis.
    pub interpolation: InterpolationMode,

    /// Extension of the per-sample files, without the dot.
    pub sample_extension: String,

    /// Active species to load.
    pub species: Vec<String>,
}

impl Default for OpacityConfig {
    fn default() -> Self {
        Self {
            opacity_root: PathBuf::from("input_data/opacities"),
            method: OpacityFormat::LineByLine,
            interpolation: InterpolationMode::Linear,
            sample_extension: "dat".to_string(),
            species: Vec::new(),
        }
    }
}

impl OpacityConfig {
    /// Configuration rooted at an explicit opacities directory.
    pub fn new(opacity_root: impl Into<PathBuf>, method: OpacityFormat) -> Self {
        Self {
            opacity_root: opacity_root.into(),
            method,
            ..Self::default()
        }
    }

    /// Configuration rooted inside a petitRADTRANS installation.
    pub fn from_petitrad_path(path: impl AsRef<Path>) -> Self {
        Self {
            opacity_root: petitrad_opacity_root(path.as_ref()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `OPACITY_ROOT` wins over `PETITRAD_PATH` when both are set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("PETITRAD_PATH") {
            config.opacity_root = petitrad_opacity_root(Path::new(&val));
        }

        if let Some(val) = lookup("OPACITY_ROOT") {
            config.opacity_root = PathBuf::from(val);
        }

        if let Some(val) = lookup("OPACITY_METHOD") {
            config.method = OpacityFormat::from_method_name(&val);
        }

        if let Some(val) = lookup("OPACITY_INTERPOLATION") {
            config.interpolation = InterpolationMode::from_str(&val);
        }

        if let Some(val) = lookup("OPACITY_SAMPLE_EXTENSION") {
            config.sample_extension = val.trim_start_matches('.').to_string();
        }

        if let Some(val) = lookup("OPACITY_SPECIES") {
            config.species = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        config
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| OpacityError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| OpacityError::Config(e.to_string()))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.opacity_root.as_os_str().is_empty() {
            return Err(OpacityError::Config("opacity_root must not be empty".to_string()));
        }

        if self.sample_extension.is_empty() {
            return Err(OpacityError::Config(
                "sample_extension must not be empty".to_string(),
            ));
        }

        if self.species.iter().any(|s| s.trim().is_empty()) {
            return Err(OpacityError::Config(
                "species names must not be blank".to_string(),
            ));
        }

        Ok(())
    }

    /// Directory scanned by discovery for this configuration's format.
    pub fn format_dir(&self) -> PathBuf {
        format_dir(&self.opacity_root, self.method)
    }
}

/// `<root>/lines/<format subdirectory>`.
pub fn format_dir(opacity_root: &Path, format: OpacityFormat) -> PathBuf {
    opacity_root.join("lines").join(format.subdirectory())
}

fn petitrad_opacity_root(path: &Path) -> PathBuf {
    path.join("petitRADTRANS").join("input_data").join("opacities")
}
