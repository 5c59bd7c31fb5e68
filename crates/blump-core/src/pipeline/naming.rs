//! Capture file name resolution.
//!
//! Raw captures follow the `<base> <ignored-token> <ordinal>.<ext>` naming
//! convention, space-delimited. The base identifier and ordinal carry over
//! into the composed asset's name; everything else is discarded.

use crate::error::{PipelineError, PipelineResult};

/// Extension given to composed assets. Lowercase on purpose: the capture
/// filter matches case-sensitively, so outputs never re-enter the pipeline.
pub const OUTPUT_EXTENSION: &str = ".png";

/// Parsed identity of a raw capture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureName {
    /// Base identifier (first token of the file name)
    pub base: String,

    /// Ordinal parsed from the third token, used for manifest ordering
    pub ordinal: i64,

    /// The ordinal exactly as it appeared in the file name. Kept verbatim
    /// for output naming so a zero-padded capture index stays zero-padded.
    ordinal_token: String,
}

impl CaptureName {
    /// Parse a capture file name.
    ///
    /// Splits on spaces; requires at least three tokens. The ordinal is the
    /// substring of the third token before its first `.`.
    pub fn parse(file_name: &str) -> PipelineResult<Self> {
        let tokens: Vec<&str> = file_name.split(' ').collect();
        if tokens.len() < 3 {
            return Err(PipelineError::Naming {
                name: file_name.to_string(),
                message: format!(
                    "expected at least 3 space-separated tokens, found {}",
                    tokens.len()
                ),
            });
        }

        let ordinal_token = tokens[2].split('.').next().unwrap_or("");
        let ordinal = ordinal_token
            .parse::<i64>()
            .map_err(|_| PipelineError::Naming {
                name: file_name.to_string(),
                message: format!("ordinal token {ordinal_token:?} is not an integer"),
            })?;

        Ok(Self {
            base: tokens[0].to_string(),
            ordinal,
            ordinal_token: ordinal_token.to_string(),
        })
    }

    /// Canonical output file name: `<base><ordinal>.png`, no separator.
    pub fn output_name(&self) -> String {
        format!("{}{}{}", self.base, self.ordinal_token, OUTPUT_EXTENSION)
    }
}
