//! blump core - capture-to-billboard batch conversion library.
//!
//! blump turns directory trees of raw multi-angle captures into packed
//! composite textures plus a `frame.json` manifest per directory, ready for
//! a renderer to reassemble into rotatable billboards.
//!
//! # Architecture
//!
//! The pipeline is sequential and destructive by design:
//!
//! ```text
//! Walk tree → per directory: load capture → resolve name → compose
//!           → save composite → delete original → build + write manifest
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use blump_core::{BatchRunner, Config};
//!
//! fn main() -> blump_core::Result<()> {
//!     let config = Config::load()?;
//!     let runner = BatchRunner::new(&config, "./images/dragon".as_ref(), "./images".as_ref());
//!     let stats = runner.run();
//!     println!("{} composites, {} manifests", stats.composed, stats.manifests);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{BlumpError, ConfigError, PipelineError, PipelineResult, Result};
pub use manifest::ManifestBuilder;
pub use pipeline::{BatchRunner, CaptureName, Compositor, DirectoryOutcome, DirectoryProcessor};
pub use types::{BatchStats, BlumpEntry, ComposedEntry, DirectoryReport, FrameManifest};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
