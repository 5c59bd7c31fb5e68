//! Composite extraction: packing a capture's stacked sub-images.
//!
//! A raw capture of size W x H holds two vertically stacked sub-images of
//! identical size H/2 for the same viewing angle: the primary render on
//! top, an auxiliary channel (typically depth) below. The compositor crops
//! the same window out of both and stacks the crops into a tight
//! `width x 2*(bottom-top)` raster with no padding.

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::config::CropConfig;
use crate::error::{PipelineError, PipelineResult};

/// Applies the configured crop window to captures.
pub struct Compositor {
    window: CropConfig,
}

impl Compositor {
    /// Create a compositor for the given crop window.
    pub fn new(window: CropConfig) -> Self {
        Self { window }
    }

    /// Pack both sub-images of `capture` into one composite raster.
    ///
    /// The window is centered horizontally with floor division, so for odd
    /// widths the surplus source pixel falls on the right. `path` is used
    /// only for error context; no filesystem access happens here.
    pub fn compose(&self, capture: &DynamicImage, path: &Path) -> PipelineResult<RgbaImage> {
        let (width, height) = capture.dimensions();
        self.check_window(width, height, path)?;

        let half = height / 2;
        let left = width / 2 - self.window.width / 2;
        let crop_height = self.window.height();

        let primary = capture
            .crop_imm(left, self.window.top, self.window.width, crop_height)
            .to_rgba8();
        let auxiliary = capture
            .crop_imm(left, half + self.window.top, self.window.width, crop_height)
            .to_rgba8();

        let mut canvas = RgbaImage::new(self.window.width, 2 * crop_height);
        image::imageops::replace(&mut canvas, &primary, 0, 0);
        image::imageops::replace(&mut canvas, &auxiliary, 0, i64::from(crop_height));
        Ok(canvas)
    }

    fn check_window(&self, width: u32, height: u32, path: &Path) -> PipelineResult<()> {
        let err = |message: String| PipelineError::Crop {
            path: path.to_path_buf(),
            width,
            height,
            message,
        };

        if height % 2 != 0 {
            return Err(err(
                "capture height is odd; expected two stacked sub-images of equal size".to_string(),
            ));
        }
        if self.window.top >= self.window.bottom {
            return Err(err(format!(
                "window top {} is not above bottom {}",
                self.window.top, self.window.bottom
            )));
        }
        if self.window.width > width {
            return Err(err(format!(
                "window width {} exceeds capture width",
                self.window.width
            )));
        }
        if self.window.bottom > height / 2 {
            return Err(err(format!(
                "window bottom {} exceeds sub-image height {}",
                self.window.bottom,
                height / 2
            )));
        }
        Ok(())
    }
}
