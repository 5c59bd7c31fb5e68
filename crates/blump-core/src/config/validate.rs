//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::pipeline::naming::OUTPUT_EXTENSION;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    ///
    /// Runs automatically on [`Config::load_from`]; call it again after
    /// applying command-line overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crop.width == 0 {
            return Err(ConfigError::ValidationError(
                "crop.width must be > 0".into(),
            ));
        }
        if self.crop.top >= self.crop.bottom {
            return Err(ConfigError::ValidationError(
                "crop.top must be < crop.bottom".into(),
            ));
        }
        if self.scan.capture_extension.is_empty() {
            return Err(ConfigError::ValidationError(
                "scan.capture_extension must not be empty".into(),
            ));
        }
        if OUTPUT_EXTENSION.ends_with(&self.scan.capture_extension) {
            return Err(ConfigError::ValidationError(format!(
                "scan.capture_extension {:?} would match composed {} outputs on a re-run",
                self.scan.capture_extension, OUTPUT_EXTENSION
            )));
        }
        if self.manifest.file_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "manifest.file_name must not be empty".into(),
            ));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "logging.level {other:?} is not one of error, warn, info, debug, trace"
                )));
            }
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "logging.format {other:?} is not one of pretty, json"
                )));
            }
        }
        Ok(())
    }
}
