use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::info;

use crate::error::Result;
use crate::models::VoidAnalysis;

/// Edge length of each square panel, in pixels.
pub const PANEL_SIZE: u32 = 400;
/// Space around and between panels.
pub const MARGIN: u32 = 20;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const BAR: Rgb<u8> = Rgb([128, 128, 128]);
const MARKER: Rgb<u8> = Rgb([220, 30, 30]);

/// Dash and gap length of the threshold marker.
const DASH: u32 = 8;

/// Width of the full three-panel figure.
pub fn figure_width() -> u32 {
    3 * PANEL_SIZE + 4 * MARGIN
}

/// Height of the full three-panel figure.
pub fn figure_height() -> u32 {
    PANEL_SIZE + 2 * MARGIN
}

/// Panel captions: original, histogram (with its legend) and mask.
pub fn panel_titles(analysis: &VoidAnalysis) -> [String; 3] {
    [
        "Original Image".to_string(),
        format!("Pixel Intensity Histogram (Threshold: {})", analysis.threshold),
        format!(
            "Detected Voids (White)\nContent: {:.2}%",
            analysis.report.percentage
        ),
    ]
}

/// Render original image, histogram and cleaned mask side by side.
///
/// The PNG carries no text since no font is bundled; [`panel_titles`]
/// gives the captions, which [`save_figure`] logs next to the file path.
pub fn render_figure(analysis: &VoidAnalysis) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(figure_width(), figure_height(), WHITE);

    let origin = |panel: u32| (MARGIN + panel * (PANEL_SIZE + MARGIN), MARGIN);

    let (x, y) = origin(0);
    draw_image_panel(&mut canvas, &analysis.original, x, y, FilterType::Triangle);

    let (x, y) = origin(1);
    draw_histogram_panel(&mut canvas, &analysis.histogram, analysis.threshold, x, y);

    let (x, y) = origin(2);
    draw_image_panel(&mut canvas, &analysis.cleaned_mask, x, y, FilterType::Nearest);

    canvas
}

/// Render the figure and write it as an image file.
pub fn save_figure(analysis: &VoidAnalysis, path: &Path) -> Result<()> {
    render_figure(analysis).save(path)?;
    let [original, histogram, mask] = panel_titles(analysis);
    info!(
        "Figure saved to {} (panels: {} | {} | {})",
        path.display(),
        original,
        histogram,
        mask.replace('\n', " ")
    );
    Ok(())
}

/// Fit `img` into a panel while keeping its aspect ratio, centred.
fn draw_image_panel(canvas: &mut RgbImage, img: &GrayImage, x: u32, y: u32, filter: FilterType) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let scale = (PANEL_SIZE as f64 / w as f64).min(PANEL_SIZE as f64 / h as f64);
    let scaled_w = ((w as f64 * scale).round() as u32).clamp(1, PANEL_SIZE);
    let scaled_h = ((h as f64 * scale).round() as u32).clamp(1, PANEL_SIZE);

    let scaled = imageops::resize(img, scaled_w, scaled_h, filter);
    let rgb = image::DynamicImage::ImageLuma8(scaled).to_rgb8();

    let offset_x = x + (PANEL_SIZE - scaled_w) / 2;
    let offset_y = y + (PANEL_SIZE - scaled_h) / 2;
    imageops::overlay(canvas, &rgb, offset_x.into(), offset_y.into());
}

fn draw_histogram_panel(
    canvas: &mut RgbImage,
    histogram: &[u32; 256],
    threshold: u8,
    x: u32,
    y: u32,
) {
    let plot_w = PANEL_SIZE as f64;
    let plot_h = PANEL_SIZE as f64;
    let max_count = histogram.iter().copied().max().unwrap_or(0).max(1) as f64;
    let bin_w = plot_w / 256.0;

    for (bin, &count) in histogram.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let left = (x as f64 + bin as f64 * bin_w).floor() as i32;
        let right = (x as f64 + (bin + 1) as f64 * bin_w).floor() as i32;
        let bar_h = ((count as f64 / max_count) * plot_h).round().max(1.0) as u32;
        let width = (right - left).max(1) as u32;
        let top = (y + PANEL_SIZE - bar_h) as i32;
        draw_filled_rect_mut(canvas, Rect::at(left, top).of_size(width, bar_h), BAR);
    }

    draw_hollow_rect_mut(
        canvas,
        Rect::at(x as i32, y as i32).of_size(PANEL_SIZE, PANEL_SIZE),
        AXIS,
    );

    // Threshold marker, dashed, at the left edge of its bin.
    let marker_x = x as f32 + threshold as f32 * bin_w as f32;
    let mut dash_top = y;
    while dash_top < y + PANEL_SIZE {
        let dash_bottom = (dash_top + DASH).min(y + PANEL_SIZE);
        for dx in [0.0, 1.0] {
            draw_line_segment_mut(
                canvas,
                (marker_x + dx, dash_top as f32),
                (marker_x + dx, dash_bottom as f32),
                MARKER,
            );
        }
        dash_top += 2 * DASH;
    }
}
