//! Core data types for the blump batch pipeline.
//!
//! These types represent the persisted manifest schema and the in-memory
//! results the pipeline stages hand to each other.

use serde::{Deserialize, Serialize};

/// One billboard resource inside a [`FrameManifest`].
///
/// Order within the manifest is significant: entries are sorted by their
/// source ordinal, and `angle` steps through a full turn in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlumpEntry {
    /// Path to the composed asset, relative to the batch root.
    /// Always `/`-separated and prefixed by the directory path with exactly
    /// one trailing slash, regardless of the host platform.
    pub resource: String,

    /// Viewing angle in degrees, starting at 0
    pub angle: f64,
}

/// The `frame.json` descriptor for one directory of composed assets.
///
/// Serialized key order is fixed: `pixelSize`, `depthRange`, `blumps`.
/// One manifest per directory that produced at least one composite; written
/// fresh on every batch run, never merged with a prior version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameManifest {
    /// Pixel size in meters, passed through from configuration
    pub pixel_size: f64,

    /// Depth range in meters, passed through from configuration
    pub depth_range: f64,

    /// Billboard entries in ascending ordinal order
    pub blumps: Vec<BlumpEntry>,
}

impl FrameManifest {
    /// Read a manifest back from disk, for consumers of a processed tree.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A successfully composed capture, as recorded by the directory processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEntry {
    /// Ordinal parsed from the capture file name.
    /// Distinct and orderable, but not necessarily contiguous or zero-based.
    pub ordinal: i64,

    /// Output file name (`<base><ordinal>.png`)
    pub file_name: String,
}

/// Report for one visited directory, as produced by the batch runner.
#[derive(Debug, Clone)]
pub struct DirectoryReport {
    /// The directory that was visited
    pub path: std::path::PathBuf,

    /// Composites committed in this directory
    pub composed: usize,

    /// Candidates skipped as undecodable
    pub skipped: usize,

    /// Whether a manifest was written
    pub manifest_written: bool,

    /// Whether a pipeline error abandoned this directory
    pub failed: bool,
}

/// Statistics for a whole batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchStats {
    /// Directories visited by the walk
    pub directories: usize,

    /// Directories abandoned by a pipeline error
    pub failed_directories: usize,

    /// Composite assets written (originals deleted)
    pub composed: usize,

    /// Candidate files skipped because they did not decode as images
    pub skipped: usize,

    /// Manifests written
    pub manifests: usize,
}

impl BatchStats {
    /// Fold one directory report into the running totals.
    pub fn record(&mut self, report: &DirectoryReport) {
        self.directories += 1;
        self.composed += report.composed;
        self.skipped += report.skipped;
        if report.manifest_written {
            self.manifests += 1;
        }
        if report.failed {
            self.failed_directories += 1;
        }
    }
}
