//! Sub-configuration structs with defaults matching the original capture rig.

use serde::{Deserialize, Serialize};

/// Crop window applied to each sub-image of a capture.
///
/// The window is centered on the capture's horizontal midpoint; for odd
/// widths the extra source pixel lands on the right (floor division of the
/// center offset). `top` and `bottom` are measured within one sub-image,
/// so `bottom` may not exceed half the capture height.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Width of the captured region in pixels
    pub width: u32,

    /// Top of the captured region, in sub-image coordinates
    pub top: u32,

    /// Bottom of the captured region (exclusive), in sub-image coordinates
    pub bottom: u32,
}

impl CropConfig {
    /// Height of the cropped region.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            width: 200,
            top: 100,
            bottom: 300,
        }
    }
}

/// Manifest constants, passed through verbatim to every `frame.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Pixel size in meters
    pub pixel_size: f64,

    /// Depth range in meters
    pub depth_range: f64,

    /// Manifest file name written into each directory
    pub file_name: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            pixel_size: 0.001,
            depth_range: 0.2,
            file_name: "frame.json".to_string(),
        }
    }
}

/// Capture discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension identifying raw captures, matched case-sensitively.
    /// Composites are written as lowercase `.png`, so the default `.PNG`
    /// keeps re-runs from picking outputs back up as inputs.
    pub capture_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            capture_extension: ".PNG".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
