//! Batch orchestration: walking the capture tree with per-directory
//! failure isolation.
//!
//! Directories are visited one at a time and never share state; a failure
//! inside one is reported and absorbed, and the batch always runs to
//! completion over the rest. The per-directory pipeline is destructive
//! (composites written, originals deleted, manifest written last), so a
//! crash mid-directory leaves it partially migrated — there is no
//! transactional guarantee across the steps.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::manifest::ManifestBuilder;
use crate::types::{BatchStats, DirectoryReport};

use super::directory::{DirectoryOutcome, DirectoryProcessor};

/// Drives the whole batch over a directory tree.
pub struct BatchRunner {
    processor: DirectoryProcessor,
    manifest: ManifestBuilder,
    folder: PathBuf,
    batch_root: PathBuf,
}

impl BatchRunner {
    /// Create a batch runner.
    ///
    /// `folder` is the tree to scan; `batch_root` anchors the relative
    /// resource paths written into manifests and may differ from `folder`.
    pub fn new(config: &Config, folder: &Path, batch_root: &Path) -> Self {
        Self {
            processor: DirectoryProcessor::new(config),
            manifest: ManifestBuilder::new(config.manifest.clone()),
            folder: folder.to_path_buf(),
            batch_root: batch_root.to_path_buf(),
        }
    }

    /// Every directory under the scan folder, the folder itself included,
    /// in sorted walk order.
    pub fn discover_directories(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.folder)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| entry.path().to_path_buf())
            .collect()
    }

    /// Process one directory and, when it yields composites, write its
    /// manifest. Failures are reported here and never escape to the batch.
    pub fn process_directory(&self, dir: &Path) -> DirectoryReport {
        let DirectoryOutcome {
            composed,
            skipped,
            error,
        } = self.processor.process(dir);

        let mut report = DirectoryReport {
            path: dir.to_path_buf(),
            composed: composed.len(),
            skipped,
            manifest_written: false,
            failed: false,
        };

        if let Some(err) = error {
            // Committed composites stay on disk; the manifest is withheld.
            tracing::error!(
                "Abandoned {:?} after {} composite(s): {}",
                dir,
                composed.len(),
                err
            );
            report.failed = true;
            return report;
        }

        if composed.is_empty() {
            return report;
        }

        let manifest = self.manifest.build(dir, &self.batch_root, &composed);
        match self.manifest.write(dir, &manifest) {
            Ok(path) => {
                tracing::debug!("Wrote {:?} with {} blump(s)", path, composed.len());
                report.manifest_written = true;
            }
            Err(err) => {
                // Assets are already committed and originals deleted at
                // this point; the missing manifest is the only trace.
                tracing::error!("{}", err);
                report.failed = true;
            }
        }
        report
    }

    /// Run the batch over every directory in the tree.
    pub fn run(&self) -> BatchStats {
        let mut stats = BatchStats::default();
        for dir in self.discover_directories() {
            let report = self.process_directory(&dir);
            stats.record(&report);
        }
        tracing::info!(
            "Batch complete: {} composites, {} manifests, {} failed directories",
            stats.composed,
            stats.manifests,
            stats.failed_directories
        );
        stats
    }
}
