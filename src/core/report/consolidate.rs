//! Consolidation of per-partition artifacts into the export root
//!
//! Append artifacts (digest lists) are concatenated verbatim. Header
//! artifacts (tabular load files) keep the first file's header line and
//! drop line 1 of every later file. A file that does not end in a newline
//! gets one before the next file's content.

use super::aggregator::partition_dirs;
use crate::config::ReportConfig;
use crate::domain::{DocketError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderPolicy {
    Verbatim,
    FirstHeaderOnly,
}

/// Concatenates per-partition artifacts from the reports tree
#[derive(Debug, Clone)]
pub struct ArtifactConsolidator {
    artifacts: Vec<(String, HeaderPolicy)>,
}

impl ArtifactConsolidator {
    pub fn new(config: &ReportConfig) -> Self {
        let append = config
            .append_artifacts
            .iter()
            .map(|name| (name.clone(), HeaderPolicy::Verbatim));
        let header = config
            .header_artifacts
            .iter()
            .map(|name| (name.clone(), HeaderPolicy::FirstHeaderOnly));
        Self {
            artifacts: append.chain(header).collect(),
        }
    }

    /// Build every configured artifact that has at least one partition instance
    ///
    /// Outputs are written to `export_root/<name>`, replacing earlier runs.
    /// Returns the paths written.
    pub fn consolidate(&self, reports_root: &Path, export_root: &Path) -> Result<Vec<PathBuf>> {
        let dirs = partition_dirs(reports_root)?;
        let mut written = Vec::new();

        for (name, policy) in &self.artifacts {
            let sources: Vec<PathBuf> = dirs
                .iter()
                .map(|dir| dir.join(name))
                .filter(|path| path.is_file())
                .collect();
            if sources.is_empty() {
                tracing::debug!(artifact = %name, "No partition instances to consolidate");
                continue;
            }

            let output = export_root.join(name);
            tracing::info!(
                artifact = %name,
                sources = sources.len(),
                output = %output.display(),
                "Consolidating artifact"
            );
            concatenate(&sources, &output, *policy)?;
            written.push(output);
        }

        Ok(written)
    }
}

fn concatenate(sources: &[PathBuf], output: &Path, policy: HeaderPolicy) -> Result<()> {
    let file = File::create(output).map_err(|e| DocketError::file_system("create", output, e))?;
    let mut writer = BufWriter::new(file);
    let mut needs_newline = false;

    for (index, source) in sources.iter().enumerate() {
        tracing::debug!(source = %source.display(), "Adding");
        let bytes = std::fs::read(source).map_err(|e| DocketError::file_system("read", source, e))?;
        let body = match policy {
            HeaderPolicy::FirstHeaderOnly if index > 0 => without_first_line(&bytes),
            _ => &bytes[..],
        };
        if needs_newline && !body.is_empty() {
            writer
                .write_all(b"\n")
                .map_err(|e| DocketError::file_system("write", output, e))?;
        }
        writer
            .write_all(body)
            .map_err(|e| DocketError::file_system("write", output, e))?;
        if let Some(last) = body.last() {
            needs_newline = *last != b'\n';
        }
    }

    writer
        .flush()
        .map_err(|e| DocketError::file_system("write", output, e))
}

fn without_first_line(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|b| *b == b'\n') {
        Some(newline) => &bytes[newline + 1..],
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (partition, name, contents) in files {
            let dir = temp.path().join("Reports").join(partition);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join(name), contents).unwrap();
        }
        temp
    }

    #[test]
    fn test_header_artifact_keeps_single_header() {
        let temp = setup(&[
            ("A", "loadfile.dat", "H\na1\na2\n"),
            ("B", "loadfile.dat", "H\nb1\nb2\n"),
            ("C", "loadfile.dat", "H\nc1\nc2\n"),
        ]);
        let consolidator = ArtifactConsolidator::new(&ReportConfig::default());
        let written = consolidator
            .consolidate(&temp.path().join("Reports"), temp.path())
            .unwrap();

        assert_eq!(written, vec![temp.path().join("loadfile.dat")]);
        let merged = std::fs::read_to_string(temp.path().join("loadfile.dat")).unwrap();
        assert_eq!(merged, "H\na1\na2\nb1\nb2\nc1\nc2\n");
    }

    #[test]
    fn test_files_without_trailing_newline_stay_on_separate_lines() {
        let temp = setup(&[
            ("A", "loadfile.dat", "H\nA1\nA2"),
            ("B", "loadfile.dat", "H\nB1\nB2"),
            ("C", "loadfile.dat", "H\nC1\nC2"),
            ("A", "top-level-MD5-digests.txt", "aaa  1.eml"),
            ("B", "top-level-MD5-digests.txt", "bbb  2.eml"),
        ]);
        ArtifactConsolidator::new(&ReportConfig::default())
            .consolidate(&temp.path().join("Reports"), temp.path())
            .unwrap();

        let merged = std::fs::read_to_string(temp.path().join("loadfile.dat")).unwrap();
        assert_eq!(merged, "H\nA1\nA2\nB1\nB2\nC1\nC2");
        assert_eq!(merged.lines().count(), 7);
        let digests =
            std::fs::read_to_string(temp.path().join("top-level-MD5-digests.txt")).unwrap();
        assert_eq!(digests, "aaa  1.eml\nbbb  2.eml");
    }

    #[test]
    fn test_append_artifact_is_verbatim() {
        let temp = setup(&[
            ("A", "top-level-MD5-digests.txt", "aaa  1.eml\n"),
            ("B", "top-level-MD5-digests.txt", "bbb  2.eml\n"),
        ]);
        ArtifactConsolidator::new(&ReportConfig::default())
            .consolidate(&temp.path().join("Reports"), temp.path())
            .unwrap();
        let merged =
            std::fs::read_to_string(temp.path().join("top-level-MD5-digests.txt")).unwrap();
        assert_eq!(merged, "aaa  1.eml\nbbb  2.eml\n");
    }

    #[test]
    fn test_rerun_replaces_previous_output() {
        let temp = setup(&[("A", "top-level-MD5-digests.txt", "aaa\n")]);
        let consolidator = ArtifactConsolidator::new(&ReportConfig::default());
        let reports = temp.path().join("Reports");
        consolidator.consolidate(&reports, temp.path()).unwrap();
        consolidator.consolidate(&reports, temp.path()).unwrap();
        let merged =
            std::fs::read_to_string(temp.path().join("top-level-MD5-digests.txt")).unwrap();
        assert_eq!(merged, "aaa\n");
    }

    #[test]
    fn test_missing_artifacts_are_not_created() {
        let temp = setup(&[("A", "other.txt", "x")]);
        let written = ArtifactConsolidator::new(&ReportConfig::default())
            .consolidate(&temp.path().join("Reports"), temp.path())
            .unwrap();
        assert!(written.is_empty());
        assert!(!temp.path().join("loadfile.dat").exists());
    }

    #[test]
    fn test_without_first_line() {
        assert_eq!(without_first_line(b"h\nrest\n"), b"rest\n");
        assert_eq!(without_first_line(b"only"), b"");
    }
}
