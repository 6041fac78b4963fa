use image::GrayImage;
use imageproc::stats::histogram;

use crate::error::{Result, VoidError};

/// Number of non-zero (void) pixels in a mask.
pub fn count_foreground(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| p[0] != 0).count() as u64
}

/// Fail fast on images with no pixels instead of dividing by zero.
pub fn ensure_not_empty(img: &GrayImage) -> Result<()> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(VoidError::DegenerateImage { width, height });
    }
    Ok(())
}

/// `void_pixels` as a percentage of `total_pixels`.
pub fn percentage_of(void_pixels: u64, total_pixels: u64) -> Result<f64> {
    if total_pixels == 0 {
        return Err(VoidError::DegenerateImage {
            width: 0,
            height: 0,
        });
    }
    Ok(void_pixels.min(total_pixels) as f64 / total_pixels as f64 * 100.0)
}

/// Share of void pixels in the mask, in percent.
pub fn void_percentage(mask: &GrayImage) -> Result<f64> {
    ensure_not_empty(mask)?;
    let total = mask.width() as u64 * mask.height() as u64;
    percentage_of(count_foreground(mask), total)
}

/// 256-bin intensity histogram.
pub fn intensity_histogram(img: &GrayImage) -> [u32; 256] {
    histogram(img).channels[0]
}
