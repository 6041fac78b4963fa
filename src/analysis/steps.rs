use crate::analysis::{morphology, preprocessing};
use crate::error::Result;
use crate::pipeline::{PipelineContext, PipelineData, PipelineStep};
use tracing::debug;

/// Apply Gaussian blur
pub struct BlurStep {
    pub kernel_size: u32,
    /// 0 derives sigma from the kernel size
    pub sigma: f64,
}

impl PipelineStep for BlurStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let blurred = preprocessing::gaussian_blur(&data.image, self.kernel_size, self.sigma)?;
        Ok(data.with_image(blurred))
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Manual inverse binary threshold: dark pixels become foreground
pub struct ThresholdStep {
    pub threshold: u8,
}

impl PipelineStep for ThresholdStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let mask = preprocessing::threshold_binary_inv(&data.image, self.threshold);
        debug!(
            "Threshold {}: {} candidate void pixels",
            self.threshold,
            mask.pixels().filter(|p| p[0] != 0).count()
        );
        Ok(data.with_image(mask))
    }

    fn name(&self) -> &str {
        "Threshold"
    }
}

/// Remove specks smaller than the structuring element
pub struct OpeningStep {
    pub kernel_size: u32,
}

impl PipelineStep for OpeningStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let opened = morphology::open(&data.image, self.kernel_size);
        Ok(data.with_image(opened))
    }

    fn name(&self) -> &str {
        "Morphological Opening"
    }
}

/// Fill small gaps inside detected voids
pub struct ClosingStep {
    pub kernel_size: u32,
}

impl PipelineStep for ClosingStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let closed = morphology::close(&data.image, self.kernel_size);
        Ok(data.with_image(closed))
    }

    fn name(&self) -> &str {
        "Morphological Closing"
    }
}
