use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader, Luma};
use imageproc::map::map_colors;

use crate::config::check_kernel_size;
use crate::error::{Result, VoidError};

/// Binomial kernels used for sigma-0 blurs of the small standard sizes.
const SMALL_GAUSSIAN_TABLES: [&[f64]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// Load an image file as single-channel 8-bit grayscale.
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let load_error = |source: image::ImageError| VoidError::Load {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(|e| load_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| load_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_error)?;

    Ok(to_grayscale(&img))
}

/// Convert image to grayscale using BT.601 luma weights
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_) => img.to_luma8(),
        DynamicImage::ImageLumaA8(_) => img.to_luma8(),
        _ => {
            let rgb = img.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                Luma([luma.round().clamp(0.0, 255.0) as u8])
            })
        }
    }
}

/// Sigma implied by a kernel size when none is given.
pub fn derived_sigma(ksize: u32) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Build a normalized 1-D Gaussian kernel.
///
/// With `sigma <= 0` the small odd sizes (1, 3, 5, 7) use fixed binomial
/// tables; larger sizes sample a Gaussian with [`derived_sigma`].
pub fn gaussian_kernel(ksize: u32, sigma: f64) -> Result<Vec<f64>> {
    check_kernel_size("blur kernel size", ksize)?;

    if sigma <= 0.0 && ksize <= 7 {
        return Ok(SMALL_GAUSSIAN_TABLES[(ksize / 2) as usize].to_vec());
    }

    let sigma = if sigma > 0.0 { sigma } else { derived_sigma(ksize) };
    let radius = (ksize / 2) as f64;
    let scale = -0.5 / (sigma * sigma);

    let mut kernel: Vec<f64> = (0..ksize)
        .map(|i| {
            let x = i as f64 - radius;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }

    Ok(kernel)
}

/// Mirror an out-of-range index back into `0..len` without repeating the edge.
fn reflect_101(index: i64, len: i64) -> usize {
    if len == 1 {
        return 0;
    }
    let mut i = index;
    loop {
        if i < 0 {
            i = -i;
        } else if i >= len {
            i = 2 * (len - 1) - i;
        } else {
            return i as usize;
        }
    }
}

/// Apply a separable Gaussian blur with reflect-101 borders.
pub fn gaussian_blur(img: &GrayImage, ksize: u32, sigma: f64) -> Result<GrayImage> {
    let kernel = gaussian_kernel(ksize, sigma)?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Ok(img.clone());
    }

    let radius = (kernel.len() / 2) as i64;
    let (w, h) = (width as i64, height as i64);

    // Horizontal pass keeps full precision for the vertical pass.
    let mut rows = vec![0.0f64; (width * height) as usize];
    for y in 0..height {
        for x in 0..w {
            let mut sum = 0.0;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src = reflect_101(x + ki as i64 - radius, w);
                sum += img.get_pixel(src as u32, y)[0] as f64 * kv;
            }
            rows[(y as i64 * w + x) as usize] = sum;
        }
    }

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let mut sum = 0.0;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src = reflect_101(y as i64 + ki as i64 - radius, h);
            sum += rows[src * width as usize + x as usize] * kv;
        }
        Luma([sum.round().clamp(0.0, 255.0) as u8])
    }))
}

/// Inverse binary threshold: pixels strictly darker than `threshold` become
/// 255 (foreground), everything else 0.
pub fn threshold_binary_inv(img: &GrayImage, threshold: u8) -> GrayImage {
    map_colors(img, |p| {
        if p[0] < threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
