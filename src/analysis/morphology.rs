use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;

/// L-infinity radius of a square structuring element: 3x3 -> 1, 5x5 -> 2.
fn radius(kernel_size: u32) -> u8 {
    (kernel_size / 2).min(u8::MAX as u32) as u8
}

/// Morphological opening (erosion followed by dilation) with a square
/// all-ones kernel. Removes foreground specks smaller than the kernel.
pub fn open(mask: &GrayImage, kernel_size: u32) -> GrayImage {
    let k = radius(kernel_size);
    if k == 0 {
        return mask.clone();
    }
    morphology::open(mask, Norm::LInf, k)
}

/// Morphological closing (dilation followed by erosion) with a square
/// all-ones kernel. Fills background gaps smaller than the kernel.
pub fn close(mask: &GrayImage, kernel_size: u32) -> GrayImage {
    let k = radius(kernel_size);
    if k == 0 {
        return mask.clone();
    }
    morphology::close(mask, Norm::LInf, k)
}
