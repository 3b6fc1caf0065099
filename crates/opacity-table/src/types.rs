//! Core types for opacity tables.

use std::fmt;
use std::path::{Path, PathBuf};

use opacity_common::MolecularWeightSource;
use serde::{Deserialize, Serialize};

use crate::config::OpacityConfig;
use crate::error::Result;
use crate::loader;
use crate::table::OpacityTable;

/// Decoder entry point shared by both on-disk formats.
pub type LoaderFn =
    fn(&MoleculeEntry, &OpacityConfig, &dyn MolecularWeightSource) -> Result<OpacityTable>;

/// On-disk opacity representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OpacityFormat {
    /// One cross section per fine wavenumber bin.
    #[default]
    LineByLine,
    /// 16 g-point quadrature values per coarse wavenumber bin.
    CorrelatedK,
}

impl OpacityFormat {
    /// Folder under `<root>/lines/` holding this format's molecules.
    pub fn subdirectory(&self) -> &'static str {
        match self {
            Self::LineByLine => "line_by_line",
            Self::CorrelatedK => "corr_k",
        }
    }

    /// Parse an opacity method name.
    ///
    /// The k-table spellings select correlated-k; anything else is line-by-line.
    pub fn from_method_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ktables" | "ktable" | "c-k" | "ck" | "corr_k" | "correlated_k" | "correlated-k" => {
                Self::CorrelatedK
            }
            _ => Self::LineByLine,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LineByLine => "line-by-line",
            Self::CorrelatedK => "correlated-k",
        }
    }

    /// The decoder for this format.
    pub fn loader(&self) -> LoaderFn {
        match self {
            Self::LineByLine => loader::line_by_line::load_line_by_line,
            Self::CorrelatedK => loader::correlated_k::load_correlated_k,
        }
    }

    /// Build the opacity table for a discovered molecule.
    pub fn load(
        &self,
        entry: &MoleculeEntry,
        config: &OpacityConfig,
        weights: &dyn MolecularWeightSource,
    ) -> Result<OpacityTable> {
        (self.loader())(entry, config, weights)
    }
}

impl fmt::Display for OpacityFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How values are combined between bracketing temperature samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Bilinear in pressure and temperature.
    #[default]
    Linear,
    /// Linear in pressure, exponential in 1/T along temperature.
    Exponential,
}

impl InterpolationMode {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "exp" | "exponential" => Self::Exponential,
            _ => Self::Linear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Exponential => "exponential",
        }
    }
}

/// Preference rank of a molecule folder; lower wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IsotopeTier {
    /// `<molecule>_main_iso`
    MainIso,
    /// `<molecule>_all_iso`
    AllIso,
    /// `<molecule>` with no isotope tag
    Bare,
}

/// A molecule resolved to the single folder that supplies its data.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeEntry {
    pub name: String,
    pub source_path: PathBuf,
    pub tier: IsotopeTier,
}

impl MoleculeEntry {
    /// Folder name, e.g. `H2O_main_iso`.
    pub fn folder_name(&self) -> &str {
        self.source_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    pub fn path(&self) -> &Path {
        &self.source_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(OpacityFormat::from_method_name("ktables"), OpacityFormat::CorrelatedK);
        assert_eq!(OpacityFormat::from_method_name("c-k"), OpacityFormat::CorrelatedK);
        assert_eq!(OpacityFormat::from_method_name("lbl"), OpacityFormat::LineByLine);
        assert_eq!(OpacityFormat::from_method_name("xsec"), OpacityFormat::LineByLine);
    }

    #[test]
    fn test_subdirectories() {
        assert_eq!(OpacityFormat::LineByLine.subdirectory(), "line_by_line");
        assert_eq!(OpacityFormat::CorrelatedK.subdirectory(), "corr_k");
    }

    #[test]
    fn test_interpolation_from_str() {
        assert_eq!(InterpolationMode::from_str("EXP"), InterpolationMode::Exponential);
        assert_eq!(InterpolationMode::from_str("linear"), InterpolationMode::Linear);
        assert_eq!(InterpolationMode::from_str("bogus"), InterpolationMode::Linear);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(IsotopeTier::MainIso < IsotopeTier::AllIso);
        assert!(IsotopeTier::AllIso < IsotopeTier::Bare);
    }

    #[test]
    fn test_folder_name() {
        let entry = MoleculeEntry {
            name: "H2O".to_string(),
            source_path: PathBuf::from("/data/lines/corr_k/H2O_main_iso"),
            tier: IsotopeTier::MainIso,
        };
        assert_eq!(entry.folder_name(), "H2O_main_iso");
    }
}
