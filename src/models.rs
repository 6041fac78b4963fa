use std::fmt;

use image::GrayImage;

use crate::analysis::measure;
use crate::error::Result;

/// Pass/fail classification of a sample's void content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Acceptable,
    Unacceptable,
}

impl Verdict {
    /// Acceptable only when the percentage is strictly below the limit.
    pub fn from_percentage(percentage: f64, limit: f64) -> Self {
        if percentage < limit {
            Verdict::Acceptable
        } else {
            Verdict::Unacceptable
        }
    }

    /// Human-readable conclusion line for the console report.
    pub fn conclusion(self, limit: f64) -> String {
        match self {
            Verdict::Acceptable => format!(
                ">>> CONCLUSION: The void content is ACCEPTABLE (less than {}%).",
                limit
            ),
            Verdict::Unacceptable => format!(
                ">>> CONCLUSION: The void content is UNACCEPTABLE (greater than {}%).",
                limit
            ),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Acceptable => write!(f, "ACCEPTABLE"),
            Verdict::Unacceptable => write!(f, "UNACCEPTABLE"),
        }
    }
}

/// Measured void content of one image.
#[derive(Debug, Clone, PartialEq)]
pub struct VoidReport {
    pub void_pixels: u64,
    pub total_pixels: u64,
    pub percentage: f64,
    pub acceptance_limit: f64,
    pub verdict: Verdict,
}

impl VoidReport {
    /// Fails with `DegenerateImage` when there are no pixels to measure.
    pub fn new(void_pixels: u64, total_pixels: u64, acceptance_limit: f64) -> Result<Self> {
        let percentage = measure::percentage_of(void_pixels, total_pixels)?;
        Ok(Self {
            void_pixels: void_pixels.min(total_pixels),
            total_pixels,
            percentage,
            acceptance_limit,
            verdict: Verdict::from_percentage(percentage, acceptance_limit),
        })
    }

    /// Measure a cleaned mask, where non-zero pixels are voids.
    pub fn from_mask(mask: &GrayImage, acceptance_limit: f64) -> Result<Self> {
        measure::ensure_not_empty(mask)?;
        let total_pixels = mask.width() as u64 * mask.height() as u64;
        let void_pixels = measure::count_foreground(mask);
        Self::new(void_pixels, total_pixels, acceptance_limit)
    }

    /// The two console lines: measured content, then the conclusion.
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Calculated Void Content: {:.2}%", self.percentage),
            self.verdict.conclusion(self.acceptance_limit),
        ]
    }
}

/// Everything produced by one analysis run.
#[derive(Debug, Clone)]
pub struct VoidAnalysis {
    /// The grayscale input, unblurred.
    pub original: GrayImage,
    /// Mask after opening and closing; 255 marks void pixels.
    pub cleaned_mask: GrayImage,
    /// Intensity histogram of `original`.
    pub histogram: [u32; 256],
    /// Threshold the mask was produced with.
    pub threshold: u8,
    pub report: VoidReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoidError;

    #[test]
    fn verdict_uses_strict_less_than() {
        assert_eq!(Verdict::from_percentage(1.99, 2.0), Verdict::Acceptable);
        assert_eq!(Verdict::from_percentage(2.0, 2.0), Verdict::Unacceptable);
        assert_eq!(Verdict::from_percentage(50.0, 2.0), Verdict::Unacceptable);
    }

    #[test]
    fn conclusion_lines_match_report_format() {
        assert_eq!(
            Verdict::Acceptable.conclusion(2.0),
            ">>> CONCLUSION: The void content is ACCEPTABLE (less than 2%)."
        );
        assert_eq!(
            Verdict::Unacceptable.conclusion(2.0),
            ">>> CONCLUSION: The void content is UNACCEPTABLE (greater than 2%)."
        );
        assert_eq!(
            Verdict::Acceptable.conclusion(2.5),
            ">>> CONCLUSION: The void content is ACCEPTABLE (less than 2.5%)."
        );
    }

    #[test]
    fn report_formats_two_decimals() {
        let report = VoidReport::new(36, 400, 2.0).unwrap();
        let [content, conclusion] = report.summary_lines();
        assert_eq!(content, "Calculated Void Content: 9.00%");
        assert!(conclusion.contains("UNACCEPTABLE"));
        assert_eq!(report.verdict.to_string(), "UNACCEPTABLE");
    }

    #[test]
    fn report_without_pixels_is_degenerate() {
        assert!(matches!(
            VoidReport::new(0, 0, 2.0),
            Err(VoidError::DegenerateImage { .. })
        ));
    }

    #[test]
    fn report_from_empty_mask_keeps_dimensions() {
        assert!(matches!(
            VoidReport::from_mask(&GrayImage::new(7, 0), 2.0),
            Err(VoidError::DegenerateImage { width: 7, height: 0 })
        ));
    }

    #[test]
    fn report_from_mask_counts_voids() {
        let mask = GrayImage::from_fn(4, 5, |x, _| image::Luma([if x == 0 { 255 } else { 0 }]));
        let report = VoidReport::from_mask(&mask, 30.0).unwrap();
        assert_eq!(report.void_pixels, 5);
        assert_eq!(report.total_pixels, 20);
        assert_eq!(report.percentage, 25.0);
        assert_eq!(report.verdict, Verdict::Acceptable);
    }
}
