//! Per-directory capture processing with staged commits.
//!
//! Each candidate runs the full load, name, compose, persist, delete
//! sequence before the next one starts; the original capture is removed
//! only once its composite is on disk. Failure isolation is
//! directory-scoped: the first naming, crop, or persistence failure
//! abandons the directory's remaining candidates, while files that already
//! committed stay committed.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::ComposedEntry;

use super::compose::Compositor;
use super::naming::CaptureName;

/// Outcome of processing one directory.
///
/// `error` is the failure that aborted the remaining candidates, if any;
/// `composed` holds the entries committed before it struck. Callers decide
/// what the error means (the batch runner reports it and skips the
/// directory's manifest).
#[derive(Debug, Default)]
pub struct DirectoryOutcome {
    /// Entries committed to disk, in processing order
    pub composed: Vec<ComposedEntry>,

    /// Candidates skipped because they did not decode as images
    pub skipped: usize,

    /// The failure that abandoned the rest of the directory
    pub error: Option<PipelineError>,
}

/// Processes every eligible capture file in one directory.
pub struct DirectoryProcessor {
    compositor: Compositor,
    capture_extension: String,
}

impl DirectoryProcessor {
    /// Create a new directory processor from the batch configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            compositor: Compositor::new(config.crop.clone()),
            capture_extension: config.scan.capture_extension.clone(),
        }
    }

    /// Process the eligible captures of `dir` in sorted-name order.
    pub fn process(&self, dir: &Path) -> DirectoryOutcome {
        let mut outcome = DirectoryOutcome::default();

        let candidates = match self.candidates(dir) {
            Ok(candidates) => candidates,
            Err(e) => {
                outcome.error = Some(e);
                return outcome;
            }
        };

        for file_name in candidates {
            let path = dir.join(&file_name);

            // Undecodable candidates are the one locally recovered failure.
            let capture = match image::open(&path) {
                Ok(capture) => capture,
                Err(e) => {
                    tracing::debug!("Skipping undecodable candidate {:?}: {}", path, e);
                    outcome.skipped += 1;
                    continue;
                }
            };

            match self.compose_one(dir, &file_name, &capture) {
                Ok(entry) => outcome.composed.push(entry),
                Err(e) => {
                    outcome.error = Some(e);
                    break;
                }
            }
        }

        outcome
    }

    /// Run one capture through naming, composition, and the commit pair
    /// (write composite, then delete original).
    fn compose_one(
        &self,
        dir: &Path,
        file_name: &str,
        capture: &image::DynamicImage,
    ) -> PipelineResult<ComposedEntry> {
        let path = dir.join(file_name);
        let name = CaptureName::parse(file_name)?;
        let composed = self.compositor.compose(capture, &path)?;

        let out_name = name.output_name();
        let out_path = dir.join(&out_name);
        composed
            .save(&out_path)
            .map_err(|e| PipelineError::Persist {
                path: out_path.clone(),
                message: e.to_string(),
            })?;
        fs::remove_file(&path).map_err(|e| PipelineError::Cleanup {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!("Composed {:?} -> {:?}", path, out_path);
        Ok(ComposedEntry {
            ordinal: name.ordinal,
            file_name: out_name,
        })
    }

    /// Candidate file names in `dir`, sorted for deterministic processing.
    /// The extension match is case-sensitive so composed `.png` outputs are
    /// never picked back up on a re-run.
    fn candidates(&self, dir: &Path) -> PipelineResult<Vec<String>> {
        let read_dir_err = |e: std::io::Error| PipelineError::ReadDir {
            path: dir.to_path_buf(),
            message: e.to_string(),
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.ends_with(&self.capture_extension) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_capture(dir: &Path, name: &str, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        });
        img.save(dir.join(name)).unwrap();
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.crop.width = 4;
        config.crop.top = 1;
        config.crop.bottom = 3;
        config
    }

    #[test]
    fn test_process_commits_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        write_capture(dir.path(), "Dragon View 0.PNG", 8, 8);
        write_capture(dir.path(), "Dragon View 1.PNG", 8, 8);

        let processor = DirectoryProcessor::new(&small_config());
        let outcome = processor.process(dir.path());

        assert!(outcome.error.is_none());
        assert_eq!(outcome.skipped, 0);
        assert_eq!(
            outcome.composed,
            vec![
                ComposedEntry {
                    ordinal: 0,
                    file_name: "Dragon0.png".to_string()
                },
                ComposedEntry {
                    ordinal: 1,
                    file_name: "Dragon1.png".to_string()
                },
            ]
        );
        assert!(dir.path().join("Dragon0.png").exists());
        assert!(dir.path().join("Dragon1.png").exists());
        assert!(!dir.path().join("Dragon View 0.PNG").exists());

        let composed = image::open(dir.path().join("Dragon0.png")).unwrap();
        assert_eq!(image::GenericImageView::dimensions(&composed), (4, 4));
    }

    #[test]
    fn test_process_skips_undecodable_candidates() {
        let dir = tempfile::tempdir().unwrap();
        write_capture(dir.path(), "Dragon View 0.PNG", 8, 8);
        std::fs::write(dir.path().join("Bogus View 9.PNG"), b"not an image").unwrap();

        let processor = DirectoryProcessor::new(&small_config());
        let outcome = processor.process(dir.path());

        assert!(outcome.error.is_none());
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.composed.len(), 1);
        // The skipped file is left alone
        assert!(dir.path().join("Bogus View 9.PNG").exists());
    }

    #[test]
    fn test_process_abandons_directory_on_naming_error() {
        let dir = tempfile::tempdir().unwrap();
        // Sorted order: "Alpha View 0.PNG" < "Broken.PNG" < "Gamma View 1.PNG"
        write_capture(dir.path(), "Alpha View 0.PNG", 8, 8);
        write_capture(dir.path(), "Broken.PNG", 8, 8);
        write_capture(dir.path(), "Gamma View 1.PNG", 8, 8);

        let processor = DirectoryProcessor::new(&small_config());
        let outcome = processor.process(dir.path());

        // Alpha committed before the failure, Gamma never reached
        assert_eq!(outcome.composed.len(), 1);
        assert_eq!(outcome.composed[0].file_name, "Alpha0.png");
        assert!(matches!(
            outcome.error,
            Some(PipelineError::Naming { .. })
        ));
        assert!(dir.path().join("Alpha0.png").exists());
        assert!(!dir.path().join("Alpha View 0.PNG").exists());
        assert!(dir.path().join("Broken.PNG").exists());
        assert!(dir.path().join("Gamma View 1.PNG").exists());
    }

    #[test]
    fn test_process_abandons_directory_on_crop_error() {
        let dir = tempfile::tempdir().unwrap();
        // Too narrow for the 4px window
        write_capture(dir.path(), "Tiny View 0.PNG", 2, 8);

        let processor = DirectoryProcessor::new(&small_config());
        let outcome = processor.process(dir.path());

        assert!(outcome.composed.is_empty());
        assert!(matches!(outcome.error, Some(PipelineError::Crop { .. })));
        // Nothing committed, original untouched
        assert!(dir.path().join("Tiny View 0.PNG").exists());
    }

    #[test]
    fn test_candidates_ignore_lowercase_outputs() {
        let dir = tempfile::tempdir().unwrap();
        write_capture(dir.path(), "Dragon View 0.PNG", 8, 8);
        write_capture(dir.path(), "Dragon7.png", 8, 8);

        let processor = DirectoryProcessor::new(&Config::default());
        let candidates = processor.candidates(dir.path()).unwrap();
        assert_eq!(candidates, vec!["Dragon View 0.PNG".to_string()]);
    }
}
