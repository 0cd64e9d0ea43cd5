//! Post-export file reorganization
//!
//! After each partition export, engine outputs in the partition's export
//! directory (the shared items directory, or `items/<custodian>` with a
//! per-partition destination) are moved into `reports/<custodian>/`.
//! Message stores stay in the export directory; in `item_name` naming mode
//! they are lifted out of the engine's subdirectories and renamed after the
//! custodian.
//!
//! Moves are destructive renames, logged before they happen. Any failure
//! is fatal for the step.

pub mod message_store;

pub use message_store::MessageStoreNaming;

use crate::config::{ExportConfig, ReorganizeConfig, ReorganizeMode};
use crate::domain::{CustodianName, DocketError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// What one reorganization step did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorganizeSummary {
    /// Files moved into the custodian's report directory
    pub moved: Vec<PathBuf>,
    /// Message stores renamed into the items directory
    pub message_stores: Vec<PathBuf>,
    /// Engine subdirectories removed once empty
    pub removed_dirs: Vec<PathBuf>,
}

/// Moves a partition's engine outputs into the reports tree
#[derive(Debug, Clone)]
pub struct FileReorganizer {
    mode: ReorganizeMode,
    artifacts: Vec<String>,
    consolidate_stores: bool,
    naming: MessageStoreNaming,
}

impl FileReorganizer {
    pub fn new(export: &ExportConfig, config: &ReorganizeConfig) -> Result<Self> {
        Ok(Self {
            mode: config.mode,
            artifacts: config.artifacts.clone(),
            consolidate_stores: export.naming.consolidates_message_stores(),
            naming: MessageStoreNaming::new(
                &config.message_store_prefix,
                &config.message_store_extension,
            )?,
        })
    }

    /// Reorganize one partition's outputs
    ///
    /// `partition_export_dir` is where the engine wrote; files are moved to
    /// `reports_root/<custodian>/`.
    ///
    /// # Errors
    ///
    /// Returns `DocketError::FileSystem` if a directory cannot be created or
    /// listed, or a rename fails (including a source vanishing mid-step).
    pub fn reorganize(
        &self,
        partition_export_dir: &Path,
        custodian: &CustodianName,
        reports_root: &Path,
    ) -> Result<ReorganizeSummary> {
        let target = reports_root.join(custodian.as_str());
        fs::create_dir_all(&target).map_err(|e| DocketError::file_system("create", &target, e))?;

        tracing::info!(
            custodian = %custodian,
            source = %partition_export_dir.display(),
            target = %target.display(),
            "Reorganizing export files"
        );

        let mut summary = ReorganizeSummary::default();
        for entry in sorted_entries(partition_export_dir)? {
            if entry.is_file() {
                let Some(name) = file_name(&entry) else {
                    continue;
                };
                if self.should_move(&name) {
                    let destination = target.join(&name);
                    move_file(&entry, &destination)?;
                    summary.moved.push(destination);
                }
            } else if entry.is_dir() && self.consolidate_stores {
                self.consolidate_message_stores(
                    &entry,
                    partition_export_dir,
                    custodian,
                    &mut summary,
                )?;
            }
        }

        tracing::debug!(
            custodian = %custodian,
            moved = summary.moved.len(),
            message_stores = summary.message_stores.len(),
            "Reorganization finished"
        );
        Ok(summary)
    }

    fn should_move(&self, name: &str) -> bool {
        if self.naming.is_message_store(name) {
            return false;
        }
        match self.mode {
            ReorganizeMode::AllFiles => true,
            ReorganizeMode::Whitelist => self.artifacts.iter().any(|a| a == name),
        }
    }

    fn consolidate_message_stores(
        &self,
        dir: &Path,
        items_dir: &Path,
        custodian: &CustodianName,
        summary: &mut ReorganizeSummary,
    ) -> Result<()> {
        for entry in sorted_entries(dir)? {
            if !entry.is_file() {
                continue;
            }
            let Some(renamed) = file_name(&entry).and_then(|n| self.naming.renamed(&n, custodian))
            else {
                continue;
            };
            let destination = items_dir.join(renamed);
            move_file(&entry, &destination)?;
            summary.message_stores.push(destination);
        }

        if sorted_entries(dir)?.is_empty() {
            tracing::info!(dir = %dir.display(), "Removing empty export directory");
            fs::remove_dir(dir).map_err(|e| DocketError::file_system("remove", dir, e))?;
            summary.removed_dirs.push(dir.to_path_buf());
        }
        Ok(())
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DocketError::file_system("list", dir, e))? {
        entries.push(
            entry
                .map_err(|e| DocketError::file_system("list", dir, e))?
                .path(),
        );
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    tracing::info!(from = %from.display(), to = %to.display(), "Moving file");
    fs::rename(from, to).map_err(|e| DocketError::file_system("move", from, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingScheme;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
    }

    impl Fixture {
        fn new(files: &[&str]) -> Self {
            let temp = TempDir::new().unwrap();
            for file in files {
                let path = temp.path().join("Items").join(file);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(&path, file.as_bytes()).unwrap();
            }
            Self { temp }
        }

        fn items(&self) -> PathBuf {
            self.temp.path().join("Items")
        }

        fn reports(&self) -> PathBuf {
            self.temp.path().join("Reports")
        }
    }

    fn reorganizer(naming: NamingScheme, mode: ReorganizeMode) -> FileReorganizer {
        let export = ExportConfig {
            naming,
            ..ExportConfig::default()
        };
        let config = ReorganizeConfig {
            mode,
            ..ReorganizeConfig::default()
        };
        FileReorganizer::new(&export, &config).unwrap()
    }

    fn jones() -> CustodianName {
        CustodianName::new("Jones").unwrap()
    }

    #[test]
    fn test_moves_reports_and_renames_message_stores() {
        let fixture = Fixture::new(&[
            "summary-report.xml",
            "loadfile.dat",
            "Jones/Export1.pst",
            "Jones/Export2.pst",
        ]);

        let summary = reorganizer(NamingScheme::ItemName, ReorganizeMode::AllFiles)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap();

        assert!(fixture.reports().join("Jones/summary-report.xml").is_file());
        assert!(fixture.reports().join("Jones/loadfile.dat").is_file());
        assert!(fixture.items().join("Jones1.pst").is_file());
        assert!(fixture.items().join("Jones2.pst").is_file());
        assert!(!fixture.items().join("Jones").exists());
        assert_eq!(summary.moved.len(), 2);
        assert_eq!(summary.message_stores.len(), 2);
        assert_eq!(summary.removed_dirs, vec![fixture.items().join("Jones")]);
    }

    #[test]
    fn test_single_message_store() {
        let fixture = Fixture::new(&["Jones/Export.pst"]);
        reorganizer(NamingScheme::ItemName, ReorganizeMode::AllFiles)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap();
        assert!(fixture.items().join("Jones.pst").is_file());
    }

    #[test]
    fn test_non_empty_subdirectory_is_kept() {
        let fixture = Fixture::new(&["Jones/Export.pst", "Jones/notes.txt"]);
        let summary = reorganizer(NamingScheme::ItemName, ReorganizeMode::AllFiles)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap();
        assert!(fixture.items().join("Jones/notes.txt").is_file());
        assert!(summary.removed_dirs.is_empty());
    }

    #[test]
    fn test_path_naming_leaves_message_stores_alone() {
        let fixture = Fixture::new(&["summary-report.xml", "Jones/Inbox/Export.pst"]);
        let summary = reorganizer(NamingScheme::ItemNameWithPath, ReorganizeMode::AllFiles)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap();
        assert!(fixture.items().join("Jones/Inbox/Export.pst").is_file());
        assert!(summary.message_stores.is_empty());
        assert_eq!(summary.moved.len(), 1);
    }

    #[test]
    fn test_top_level_message_stores_are_not_moved() {
        let fixture = Fixture::new(&["Smith.pst", "top-level-MD5-digests.txt"]);
        reorganizer(NamingScheme::ItemName, ReorganizeMode::AllFiles)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap();
        assert!(fixture.items().join("Smith.pst").is_file());
        assert!(fixture.reports().join("Jones/top-level-MD5-digests.txt").is_file());
    }

    #[test]
    fn test_whitelist_mode_moves_only_artifacts() {
        let fixture = Fixture::new(&["summary-report.xml", "loadfile.dat", "top-level-MD5-digests.txt"]);
        reorganizer(NamingScheme::ItemName, ReorganizeMode::Whitelist)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap();
        assert!(fixture.reports().join("Jones/summary-report.xml").is_file());
        assert!(fixture.reports().join("Jones/top-level-MD5-digests.txt").is_file());
        assert!(fixture.items().join("loadfile.dat").is_file());
    }

    #[test]
    fn test_missing_export_dir_is_fatal() {
        let fixture = Fixture::new(&[]);
        let err = reorganizer(NamingScheme::ItemName, ReorganizeMode::AllFiles)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap_err();
        assert!(matches!(err, DocketError::FileSystem(_)));
        // The report directory is still created first
        assert!(fixture.reports().join("Jones").is_dir());
    }

    #[test]
    fn test_reorganize_is_idempotent_on_directory_creation() {
        let fixture = Fixture::new(&["a.txt"]);
        fs::create_dir_all(fixture.reports().join("Jones")).unwrap();
        reorganizer(NamingScheme::ItemName, ReorganizeMode::AllFiles)
            .reorganize(&fixture.items(), &jones(), &fixture.reports())
            .unwrap();
        assert!(fixture.reports().join("Jones/a.txt").is_file());
    }
}
