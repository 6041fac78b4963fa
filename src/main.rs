use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use voidscan::{AnalysisConfig, ConfigOverrides, VoidAnalyzer, figure};

#[derive(Parser)]
#[command(name = "voidscan")]
#[command(about = "Estimate the void content of a composite cross-section micrograph")]
#[command(version)]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", required_unless_present = "print_config")]
    image_path: Option<PathBuf>,

    /// TOML file with analysis parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pixels darker than this (after blurring) count as voids
    #[arg(long)]
    threshold: Option<u8>,

    /// Void percentage below which the sample is acceptable
    #[arg(long, value_name = "PCT")]
    acceptance_limit: Option<f64>,

    /// Gaussian kernel size (odd)
    #[arg(long, value_name = "N")]
    blur_kernel: Option<u32>,

    /// Structuring element size for opening/closing (odd)
    #[arg(long, value_name = "N")]
    morph_kernel: Option<u32>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Save the three-panel figure to an image file
    #[arg(long, value_name = "FILE")]
    save_figure: Option<PathBuf>,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Do not open the result window
    #[arg(long)]
    no_display: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            threshold: self.threshold,
            acceptance_limit: self.acceptance_limit,
            blur_kernel_size: self.blur_kernel,
            morph_kernel_size: self.morph_kernel,
        }
    }

    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let config = match &self.config {
            Some(path) => AnalysisConfig::from_toml_file(path)?,
            None => AnalysisConfig::default(),
        };
        Ok(config.with_overrides(&self.overrides())?)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.analysis_config()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let image_path = args
        .image_path
        .as_deref()
        .context("No input image given")?;

    let mut analyzer = VoidAnalyzer::new(config);
    if let Some(dir) = &args.debug_out {
        analyzer = analyzer.with_debug(dir);
    }

    let analysis = analyzer
        .analyze_path(image_path)
        .with_context(|| format!("Void analysis failed for {}", image_path.display()))?;

    if let Some(path) = &args.save_figure {
        figure::save_figure(&analysis, path)
            .with_context(|| format!("Failed to save figure to {}", path.display()))?;
    }

    if !args.no_display {
        show(&analysis)?;
    }

    for line in analysis.report.summary_lines() {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn show(analysis: &voidscan::VoidAnalysis) -> anyhow::Result<()> {
    if !voidscan::gui::display_available() {
        tracing::warn!("No display found; skipping the result window");
        return Ok(());
    }
    voidscan::gui::show(analysis).context("Failed to open viewer")
}

#[cfg(not(feature = "gui"))]
fn show(_analysis: &voidscan::VoidAnalysis) -> anyhow::Result<()> {
    tracing::warn!("Built without the `gui` feature; use --save-figure to keep the plot");
    Ok(())
}
