use image::GrayImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, VoidError};

/// Data that flows through the pipeline
#[derive(Clone)]
pub struct PipelineData {
    /// The current stage image (grayscale, or a 0/255 mask after thresholding)
    pub image: GrayImage,

    /// Reference to the original image (shared efficiently via Arc)
    pub original: Arc<GrayImage>,
}

impl PipelineData {
    /// Create PipelineData for a full image
    pub fn from_image(image: GrayImage) -> Self {
        let original = Arc::new(image.clone());
        Self { image, original }
    }

    /// Replace the stage image, keeping the shared original
    pub fn with_image(self, image: GrayImage) -> Self {
        Self {
            image,
            original: self.original,
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    fn save(&self, file_stem: &str, image: &GrayImage) -> Result<()> {
        let path = self.output_dir.join(format!("{file_stem}.png"));
        image.save(&path)?;
        debug!("Debug: saved {}", path.display());
        Ok(())
    }
}

/// Context available to all pipeline steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Transform the stage image
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug file names)
    fn name(&self) -> &str;
}

fn step_file_stem(index: usize, name: &str) -> String {
    format!("{:02}_{}", index, name.to_lowercase().replace(' ', "_"))
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(VoidError::InvalidConfig(format!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    /// Names of the configured steps, in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step on the input image
    pub fn run(&self, input: GrayImage) -> Result<PipelineData> {
        self.run_partial(input, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: GrayImage, num_steps: usize) -> Result<PipelineData> {
        if let Some(debug_config) = &self.context.debug {
            debug_config.save("00_input", &input)?;
        }

        let mut data = PipelineData::from_image(input);

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            debug!("Running step {}: {}", step_idx + 1, step.name());
            data = step.process(data, &self.context)?;

            if let Some(debug_config) = &self.context.debug {
                debug_config.save(&step_file_stem(step_idx + 1, step.name()), &data.image)?;
            }
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
