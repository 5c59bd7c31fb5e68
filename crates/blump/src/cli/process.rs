//! The `blump process` command for converting capture trees.

use clap::Args;
use std::path::PathBuf;

use blump_core::{BatchRunner, BatchStats, Config};

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Root folder to scan for captures
    #[arg(required = true)]
    pub folder: PathBuf,

    /// Root for relative resource paths in manifests (defaults to FOLDER)
    #[arg(long)]
    pub batch_root: Option<PathBuf>,

    /// Load configuration from a specific file instead of the default path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Width of the capture region in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Top of the capture region, in sub-image coordinates
    #[arg(long)]
    pub top: Option<u32>,

    /// Bottom of the capture region (exclusive), in sub-image coordinates
    #[arg(long)]
    pub bottom: Option<u32>,

    /// Pixel size in meters, written into each manifest
    #[arg(long)]
    pub pixel_size: Option<f64>,

    /// Depth range in meters, written into each manifest
    #[arg(long)]
    pub depth_range: Option<f64>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the process command.
pub fn execute(args: ProcessArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    if !args.folder.is_dir() {
        anyhow::bail!("Not a directory: {}", args.folder.display());
    }
    let batch_root = args
        .batch_root
        .clone()
        .unwrap_or_else(|| args.folder.clone());

    let runner = BatchRunner::new(&config, &args.folder, &batch_root);
    let directories = runner.discover_directories();
    tracing::info!(
        "Scanning {} directories under {:?}",
        directories.len(),
        args.folder
    );

    let progress = if args.no_progress {
        indicatif::ProgressBar::hidden()
    } else {
        create_progress_bar(directories.len() as u64)
    };

    let start_time = std::time::Instant::now();
    let mut stats = BatchStats::default();
    for dir in &directories {
        let report = runner.process_directory(dir);
        stats.record(&report);
        progress.inc(1);
        progress.set_message(format!("{} composites", stats.composed));
    }
    progress.finish_and_clear();

    print_summary(&stats, start_time.elapsed());
    Ok(())
}

/// Load configuration and apply command-line overrides.
fn load_config(args: &ProcessArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(width) = args.width {
        config.crop.width = width;
    }
    if let Some(top) = args.top {
        config.crop.top = top;
    }
    if let Some(bottom) = args.bottom {
        config.crop.bottom = bottom;
    }
    if let Some(pixel_size) = args.pixel_size {
        config.manifest.pixel_size = pixel_size;
    }
    if let Some(depth_range) = args.depth_range {
        config.manifest.depth_range = depth_range;
    }

    // Overrides can break the window invariants, so validate again
    config.validate()?;
    Ok(config)
}

/// Create a progress bar for batch processing.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} dirs {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after batch processing.
fn print_summary(stats: &BatchStats, elapsed: std::time::Duration) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Directories:  {:>8}", stats.directories);
    eprintln!("    Composites:   {:>8}", stats.composed);
    eprintln!("    Manifests:    {:>8}", stats.manifests);
    if stats.skipped > 0 {
        eprintln!("    Skipped:      {:>8}", stats.skipped);
    }
    if stats.failed_directories > 0 {
        eprintln!("    Failed dirs:  {:>8}", stats.failed_directories);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(folder: &std::path::Path) -> ProcessArgs {
        ProcessArgs {
            folder: folder.to_path_buf(),
            batch_root: None,
            config: None,
            width: None,
            top: None,
            bottom: None,
            pixel_size: None,
            depth_range: None,
            no_progress: true,
        }
    }

    #[test]
    fn test_load_config_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(dir.path());
        args.width = Some(64);
        args.top = Some(8);
        args.bottom = Some(24);
        args.pixel_size = Some(0.005);

        let config = load_config(&args).unwrap();
        assert_eq!(config.crop.width, 64);
        assert_eq!(config.crop.top, 8);
        assert_eq!(config.crop.bottom, 24);
        assert_eq!(config.manifest.pixel_size, 0.005);
    }

    #[test]
    fn test_load_config_rejects_inverted_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args_for(dir.path());
        args.top = Some(300);
        args.bottom = Some(100);

        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("crop.top"));
    }

    #[test]
    fn test_execute_rejects_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(&dir.path().join("nope"));
        let err = execute(args).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }
}
