//! Manifest building: ordering, angle assignment, path normalization, and
//! the `frame.json` serialization format.
//!
//! Entries are ordered by source ordinal, not by discovery order, and the
//! angle steps divide a full turn evenly over however many composites the
//! directory produced. Resource paths are written relative to the batch
//! root with `/` separators on every platform.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::config::ManifestConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{BlumpEntry, ComposedEntry, FrameManifest};

/// Builds and persists per-directory manifests.
pub struct ManifestBuilder {
    config: ManifestConfig,
}

impl ManifestBuilder {
    /// Create a manifest builder with the given constants.
    pub fn new(config: ManifestConfig) -> Self {
        Self { config }
    }

    /// Build the ordered, angle-annotated manifest for one directory.
    ///
    /// `entries` may arrive in any order; they are sorted ascending by
    /// ordinal, and entry `i` of `n` gets angle `i * 360 / n` degrees.
    pub fn build(&self, dir: &Path, batch_root: &Path, entries: &[ComposedEntry]) -> FrameManifest {
        let prefix = resource_prefix(dir, batch_root);

        let mut sorted: Vec<&ComposedEntry> = entries.iter().collect();
        sorted.sort_by_key(|entry| entry.ordinal);

        let step = 360.0 / sorted.len() as f64;
        let blumps = sorted
            .iter()
            .enumerate()
            .map(|(i, entry)| BlumpEntry {
                resource: format!("{}{}", prefix, entry.file_name),
                angle: i as f64 * step,
            })
            .collect();

        FrameManifest {
            pixel_size: self.config.pixel_size,
            depth_range: self.config.depth_range,
            blumps,
        }
    }

    /// Write `manifest` into `dir`, unconditionally overwriting any prior
    /// file. Returns the path written.
    pub fn write(&self, dir: &Path, manifest: &FrameManifest) -> PipelineResult<PathBuf> {
        let path = dir.join(&self.config.file_name);
        let manifest_err = |message: String| PipelineError::Manifest {
            path: path.clone(),
            message,
        };

        // 4-space indentation is part of the manifest format
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        manifest
            .serialize(&mut serializer)
            .map_err(|e| manifest_err(e.to_string()))?;

        std::fs::write(&path, &buffer).map_err(|e| manifest_err(e.to_string()))?;
        Ok(path)
    }
}

/// The directory's path relative to the batch root, `/`-separated with
/// exactly one trailing slash. A directory equal to the batch root yields
/// `./`; a directory outside it walks up with `..` components.
fn resource_prefix(dir: &Path, batch_root: &Path) -> String {
    let dir_parts: Vec<Component> = dir.components().collect();
    let root_parts: Vec<Component> = batch_root.components().collect();
    let common = dir_parts
        .iter()
        .zip(root_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = root_parts[common..]
        .iter()
        .map(|_| "..".to_string())
        .collect();
    parts.extend(
        dir_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        return "./".to_string();
    }
    let mut prefix = parts.join("/");
    prefix.push('/');
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ordinal: i64, file_name: &str) -> ComposedEntry {
        ComposedEntry {
            ordinal,
            file_name: file_name.to_string(),
        }
    }

    #[test]
    fn test_build_sorts_by_ordinal_and_assigns_angles() {
        let builder = ManifestBuilder::new(ManifestConfig::default());
        // Deliberately out of order
        let entries = vec![
            entry(2, "Dragon2.png"),
            entry(0, "Dragon0.png"),
            entry(3, "Dragon3.png"),
            entry(1, "Dragon1.png"),
        ];

        let manifest = builder.build(
            Path::new("/assets/dragon"),
            Path::new("/assets"),
            &entries,
        );

        let resources: Vec<&str> = manifest
            .blumps
            .iter()
            .map(|b| b.resource.as_str())
            .collect();
        assert_eq!(
            resources,
            vec![
                "dragon/Dragon0.png",
                "dragon/Dragon1.png",
                "dragon/Dragon2.png",
                "dragon/Dragon3.png",
            ]
        );
        let angles: Vec<f64> = manifest.blumps.iter().map(|b| b.angle).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_build_angles_use_float_division() {
        let builder = ManifestBuilder::new(ManifestConfig::default());
        let entries: Vec<ComposedEntry> =
            (0..3).map(|i| entry(i, &format!("Pot{i}.png"))).collect();

        let manifest = builder.build(Path::new("/a/pots"), Path::new("/a"), &entries);
        assert_eq!(manifest.blumps[1].angle, 120.0);
        assert_eq!(manifest.blumps[2].angle, 240.0);
    }

    #[test]
    fn test_build_handles_sparse_ordinals() {
        let builder = ManifestBuilder::new(ManifestConfig::default());
        let entries = vec![entry(10, "Pot10.png"), entry(4, "Pot4.png")];

        let manifest = builder.build(Path::new("/a/pots"), Path::new("/a"), &entries);
        assert_eq!(manifest.blumps[0].resource, "pots/Pot4.png");
        assert_eq!(manifest.blumps[0].angle, 0.0);
        assert_eq!(manifest.blumps[1].resource, "pots/Pot10.png");
        assert_eq!(manifest.blumps[1].angle, 180.0);
    }

    #[test]
    fn test_resource_prefix_nested() {
        assert_eq!(
            resource_prefix(Path::new("/batch/images/dragon"), Path::new("/batch")),
            "images/dragon/"
        );
    }

    #[test]
    fn test_resource_prefix_at_root() {
        assert_eq!(
            resource_prefix(Path::new("/batch/images"), Path::new("/batch/images")),
            "./"
        );
    }

    #[test]
    fn test_resource_prefix_outside_root() {
        assert_eq!(
            resource_prefix(Path::new("/scans/dragon"), Path::new("/batch/images")),
            "../../scans/dragon/"
        );
    }

    #[test]
    fn test_write_uses_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ManifestBuilder::new(ManifestConfig::default());
        let entries = vec![entry(0, "Dragon0.png")];
        let manifest = builder.build(dir.path(), dir.path(), &entries);

        let path = builder.write(dir.path(), &manifest).unwrap();
        assert_eq!(path, dir.path().join("frame.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n    \"pixelSize\""));
        assert!(content.contains("\n    \"blumps\""));
        assert!(content.contains("\"resource\": \"./Dragon0.png\""));

        let parsed: FrameManifest = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.blumps.len(), 1);
    }

    #[test]
    fn test_write_overwrites_prior_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let builder = ManifestBuilder::new(ManifestConfig::default());
        std::fs::write(dir.path().join("frame.json"), "stale").unwrap();

        let manifest = builder.build(dir.path(), dir.path(), &[entry(0, "Pot0.png")]);
        builder.write(dir.path(), &manifest).unwrap();

        let content = std::fs::read_to_string(dir.path().join("frame.json")).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("Pot0.png"));
    }
}
