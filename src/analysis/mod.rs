pub mod measure;
pub mod morphology;
pub mod preprocessing;
pub mod steps;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::GrayImage;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{VoidAnalysis, VoidReport};
use crate::pipeline::Pipeline;

/// Void-content estimator: blur, threshold, open, close, measure.
pub struct VoidAnalyzer {
    pub config: AnalysisConfig,
    debug_dir: Option<PathBuf>,
}

impl VoidAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            debug_dir: None,
        }
    }

    /// Dump every intermediate stage as PNG into `dir` (must be empty or absent).
    pub fn with_debug(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    /// Load an image file and analyze it.
    pub fn analyze_path(&self, path: &Path) -> Result<VoidAnalysis> {
        info!("Loading image: {}", path.display());
        let img = preprocessing::load_grayscale(path)?;
        self.analyze(&img)
    }

    /// Run the full analysis on a grayscale image.
    pub fn analyze(&self, img: &GrayImage) -> Result<VoidAnalysis> {
        self.config.validate()?;
        measure::ensure_not_empty(img)?;
        debug!("Image loaded: {}x{}", img.width(), img.height());

        let mut pipeline = build_standard_pipeline(&self.config);
        if let Some(dir) = &self.debug_dir {
            pipeline = pipeline.with_debug(dir)?;
        }

        let result = pipeline.run(img.clone())?;
        let cleaned_mask = result.image;

        let report = VoidReport::from_mask(&cleaned_mask, self.config.acceptance_limit)?;

        info!(
            "Void pixels: {} of {} ({:.2}%), verdict {}",
            report.void_pixels, report.total_pixels, report.percentage, report.verdict
        );

        Ok(VoidAnalysis {
            histogram: measure::intensity_histogram(&result.original),
            original: Arc::unwrap_or_clone(result.original),
            cleaned_mask,
            threshold: self.config.threshold,
            report,
        })
    }
}

impl Default for VoidAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Build the standard void-detection pipeline from a config
pub fn build_standard_pipeline(config: &AnalysisConfig) -> Pipeline {
    use crate::analysis::steps::*;

    Pipeline::new()
        .add_step(Arc::new(BlurStep {
            kernel_size: config.blur_kernel_size,
            sigma: config.blur_sigma,
        }))
        .add_step(Arc::new(ThresholdStep {
            threshold: config.threshold,
        }))
        .add_step(Arc::new(OpeningStep {
            kernel_size: config.morph_kernel_size,
        }))
        .add_step(Arc::new(ClosingStep {
            kernel_size: config.morph_kernel_size,
        }))
}
