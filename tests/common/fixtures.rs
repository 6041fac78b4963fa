use image::{DynamicImage, GrayImage, Luma};
use tempfile::NamedTempFile;
use voidscan::AnalysisConfig;

/// Uniform image of a single intensity.
pub fn uniform_image(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

/// `background` image with a `size`x`size` square of `block` whose top-left
/// corner is at (`x0`, `y0`).
pub fn block_image(
    width: u32,
    height: u32,
    background: u8,
    block: u8,
    (x0, y0): (u32, u32),
    size: u32,
) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        if (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y) {
            Luma([block])
        } else {
            Luma([background])
        }
    })
}

/// Deterministic speckled image covering the full intensity range.
pub fn speckle_image(width: u32, height: u32, seed: u32) -> GrayImage {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    GrayImage::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        Luma([(state >> 16) as u8])
    })
}

/// Config with blurring disabled, so masks follow the raw pixels.
pub fn unblurred_config() -> AnalysisConfig {
    AnalysisConfig {
        blur_kernel_size: 1,
        ..AnalysisConfig::default()
    }
}

/// Writes an image into a temporary PNG file.
/// The file will be automatically cleaned up when dropped.
pub fn save_temp_png(img: impl Into<DynamicImage>) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.into()
        .save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}
