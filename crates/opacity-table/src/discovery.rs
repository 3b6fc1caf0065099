//! Molecule discovery.
//!
//! Folder names encode `<molecule>[_<isotope tag>]`. For each molecule the
//! `main_iso` folder wins over `all_iso`, which wins over an untagged folder.
//! Folders are visited in name order and the first folder seen in a tier is
//! kept, so the result never depends on directory enumeration order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{format_dir, OpacityConfig};
use crate::error::{OpacityError, Result};
use crate::types::{IsotopeTier, MoleculeEntry, OpacityFormat};

const MAIN_ISO: &str = "main_iso";
const ALL_ISO: &str = "all_iso";

/// Molecules available for one opacity format, one folder each.
#[derive(Debug, Clone)]
pub struct MoleculeCatalog {
    format: OpacityFormat,
    directory: PathBuf,
    entries: BTreeMap<String, MoleculeEntry>,
}

impl MoleculeCatalog {
    /// Discover molecules for the configured root and method.
    pub fn discover(config: &OpacityConfig) -> Result<Self> {
        Self::discover_in(&config.opacity_root, config.method)
    }

    /// Discover molecules under `<opacity_root>/lines/<format>`.
    ///
    /// A missing directory yields an empty catalog.
    pub fn discover_in(opacity_root: &Path, format: OpacityFormat) -> Result<Self> {
        let directory = format_dir(opacity_root, format);
        let mut catalog = Self {
            format,
            directory,
            entries: BTreeMap::new(),
        };

        if !catalog.directory.is_dir() {
            warn!(
                path = %catalog.directory.display(),
                format = %format,
                "Opacity directory does not exist, no molecules discovered"
            );
            return Ok(catalog);
        }

        let walker = WalkDir::new(&catalog.directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_dangling_link(&e) => {
                    warn!(path = ?e.path(), "Skipping dangling symlink");
                    continue;
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| catalog.directory.clone());
                    return Err(OpacityError::io(path, e.into()));
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let Some(folder) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "Skipping non UTF-8 folder name");
                continue;
            };

            match classify_folder(folder) {
                Some((molecule, tier)) => catalog.offer(molecule, tier, entry.path()),
                None => debug!(folder = %folder, "Ignoring folder with unrecognised isotope tag"),
            }
        }

        info!(
            format = %format,
            path = %catalog.directory.display(),
            molecules = catalog.entries.len(),
            "Discovered opacity molecules"
        );

        Ok(catalog)
    }

    /// Keep the candidate only if no folder of the same or a better tier was seen.
    fn offer(&mut self, molecule: &str, tier: IsotopeTier, path: &Path) {
        if let Some(existing) = self.entries.get(molecule) {
            if existing.tier <= tier {
                debug!(
                    molecule = %molecule,
                    kept = %existing.source_path.display(),
                    ignored = %path.display(),
                    "Duplicate molecule folder ignored"
                );
                return;
            }
        }

        self.entries.insert(
            molecule.to_string(),
            MoleculeEntry {
                name: molecule.to_string(),
                source_path: path.to_path_buf(),
                tier,
            },
        );
    }

    pub fn format(&self) -> OpacityFormat {
        self.format
    }

    /// Directory that was scanned.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn get(&self, molecule: &str) -> Option<&MoleculeEntry> {
        self.entries.get(molecule)
    }

    /// Look up a molecule, failing with `DatasetNotFound` when absent.
    pub fn resolve(&self, molecule: &str) -> Result<&MoleculeEntry> {
        self.get(molecule)
            .ok_or_else(|| OpacityError::dataset_not_found(molecule, self.format))
    }

    /// Folder names supplying each active gas, in the order given.
    pub fn line_species<S: AsRef<str>>(&self, active_gases: &[S]) -> Result<Vec<String>> {
        active_gases
            .iter()
            .map(|gas| {
                self.resolve(gas.as_ref())
                    .map(|entry| entry.folder_name().to_string())
            })
            .collect()
    }

    /// Discovered molecule names, sorted.
    pub fn molecules(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoleculeEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A followed symlink whose target no longer exists.
pub(crate) fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

/// Split a folder name into molecule and isotope tier.
///
/// Returns `None` for tags other than `main_iso`/`all_iso`.
pub fn classify_folder(folder: &str) -> Option<(&str, IsotopeTier)> {
    match folder.split_once('_') {
        None if !folder.is_empty() => Some((folder, IsotopeTier::Bare)),
        Some((molecule, MAIN_ISO)) if !molecule.is_empty() => {
            Some((molecule, IsotopeTier::MainIso))
        }
        Some((molecule, ALL_ISO)) if !molecule.is_empty() => Some((molecule, IsotopeTier::AllIso)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tree(format: OpacityFormat, folders: &[&str]) -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let dir = format_dir(root.path(), format);
        for folder in folders {
            std::fs::create_dir_all(dir.join(folder)).unwrap();
        }
        root
    }

    #[test]
    fn test_classify_folder() {
        assert_eq!(classify_folder("H2O"), Some(("H2O", IsotopeTier::Bare)));
        assert_eq!(classify_folder("H2O_main_iso"), Some(("H2O", IsotopeTier::MainIso)));
        assert_eq!(classify_folder("CO_all_iso"), Some(("CO", IsotopeTier::AllIso)));
        assert_eq!(classify_folder("CO_HITEMP"), None);
        assert_eq!(classify_folder("_main_iso"), None);
        assert_eq!(classify_folder(""), None);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let catalog =
            MoleculeCatalog::discover_in(&root.path().join("nope"), OpacityFormat::CorrelatedK)
                .unwrap();
        assert!(catalog.is_empty());
        assert!(matches!(
            catalog.resolve("H2O"),
            Err(OpacityError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_tier_preference() {
        let root = make_tree(
            OpacityFormat::CorrelatedK,
            &["H2O", "H2O_all_iso", "H2O_main_iso", "CO", "CO_all_iso", "CH4"],
        );
        let catalog = MoleculeCatalog::discover_in(root.path(), OpacityFormat::CorrelatedK).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.resolve("H2O").unwrap().folder_name(), "H2O_main_iso");
        assert_eq!(catalog.resolve("CO").unwrap().folder_name(), "CO_all_iso");
        assert_eq!(catalog.resolve("CH4").unwrap().folder_name(), "CH4");
    }

    #[test]
    fn test_unknown_tags_and_files_ignored() {
        let root = make_tree(OpacityFormat::LineByLine, &["CO2_HITEMP", "NH3"]);
        let dir = format_dir(root.path(), OpacityFormat::LineByLine);
        std::fs::write(dir.join("README"), b"not a molecule").unwrap();

        let catalog = MoleculeCatalog::discover_in(root.path(), OpacityFormat::LineByLine).unwrap();
        assert_eq!(catalog.molecules().collect::<Vec<_>>(), vec!["NH3"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folder_is_discovered() {
        let root = make_tree(OpacityFormat::LineByLine, &[]);
        let dir = format_dir(root.path(), OpacityFormat::LineByLine);
        std::fs::create_dir_all(&dir).unwrap();
        let store = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(store.path(), dir.join("H2O_main_iso")).unwrap();

        let catalog = MoleculeCatalog::discover_in(root.path(), OpacityFormat::LineByLine).unwrap();
        let entry = catalog.resolve("H2O").unwrap();
        assert_eq!(entry.tier, IsotopeTier::MainIso);
        assert_eq!(entry.source_path, dir.join("H2O_main_iso"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let root = make_tree(OpacityFormat::LineByLine, &["CO"]);
        let dir = format_dir(root.path(), OpacityFormat::LineByLine);
        std::os::unix::fs::symlink(root.path().join("gone"), dir.join("H2O_main_iso")).unwrap();

        let catalog = MoleculeCatalog::discover_in(root.path(), OpacityFormat::LineByLine).unwrap();
        assert_eq!(catalog.molecules().collect::<Vec<_>>(), vec!["CO"]);
    }

    #[test]
    fn test_formats_are_separate() {
        let root = make_tree(OpacityFormat::LineByLine, &["H2O_main_iso"]);
        let catalog = MoleculeCatalog::discover_in(root.path(), OpacityFormat::CorrelatedK).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_line_species() {
        let root = make_tree(OpacityFormat::CorrelatedK, &["H2O_main_iso", "CO_all_iso"]);
        let catalog = MoleculeCatalog::discover_in(root.path(), OpacityFormat::CorrelatedK).unwrap();

        assert_eq!(
            catalog.line_species(&["CO", "H2O"]).unwrap(),
            vec!["CO_all_iso", "H2O_main_iso"]
        );
        assert!(matches!(
            catalog.line_species(&["H2O", "TiO"]),
            Err(OpacityError::DatasetNotFound { ref molecule, .. }) if molecule == "TiO"
        ));
    }
}
