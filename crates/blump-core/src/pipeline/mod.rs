//! Capture processing pipeline components.
//!
//! This module contains the stages of the blump pipeline:
//! - **naming**: Parse capture file names into base identifier and ordinal
//! - **compose**: Pack a capture's stacked sub-images into one composite
//! - **directory**: Process one directory's captures with staged commits
//! - **batch**: Drive the whole tree with per-directory failure isolation

pub mod batch;
pub mod compose;
pub mod directory;
pub mod naming;

// Re-exports for convenient access
pub use batch::BatchRunner;
pub use compose::Compositor;
pub use directory::{DirectoryOutcome, DirectoryProcessor};
pub use naming::{CaptureName, OUTPUT_EXTENSION};
