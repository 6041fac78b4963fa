//! Integration tests for loading images from disk and debug output.
//!
//! Tests cover:
//! - Load failures (missing files, undecodable content)
//! - Grayscale and colour files analyzed through `analyze_path`
//! - Debug stage dumps and the empty-directory requirement
//! - Saving the three-panel figure

mod common;

use std::io::Write;

use common::*;
use image::{Rgb, RgbImage};
use voidscan::analysis::preprocessing::load_grayscale;
use voidscan::figure;

#[test]
fn test_missing_file_is_load_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.jpeg");

    let err = VoidAnalyzer::default().analyze_path(&path).unwrap_err();
    match err {
        VoidError::Load { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected load error, got {other:?}"),
    }
}

#[test]
fn test_garbage_file_is_load_error() {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"definitely not a png").unwrap();
    file.flush().unwrap();

    assert!(matches!(
        load_grayscale(file.path()),
        Err(VoidError::Load { .. })
    ));
}

#[test]
fn test_analyze_path_matches_in_memory_analysis() -> anyhow::Result<()> {
    let img = block_image(20, 20, 200, 0, (7, 7), 6);
    let file = save_temp_png(img.clone());

    let analyzer = VoidAnalyzer::default();
    let from_disk = analyzer.analyze_path(file.path())?;
    let in_memory = analyzer.analyze(&img)?;

    assert_eq!(from_disk.original, img);
    assert_eq!(from_disk.report, in_memory.report);
    Ok(())
}

#[test]
fn test_colour_file_is_converted_to_gray() -> anyhow::Result<()> {
    let img = RgbImage::from_fn(12, 12, |x, _| {
        if x < 6 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    let file = save_temp_png(img);

    let gray = load_grayscale(file.path())?;
    assert_eq!(gray.dimensions(), (12, 12));
    assert_eq!(gray.get_pixel(0, 0)[0], 0);
    assert_eq!(gray.get_pixel(11, 0)[0], 255);
    Ok(())
}

#[test]
fn test_debug_output_writes_every_stage() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let debug_dir = dir.path().join("stages");

    let img = block_image(20, 20, 200, 0, (7, 7), 6);
    let analysis = VoidAnalyzer::default()
        .with_debug(&debug_dir)
        .analyze(&img)?;

    for name in [
        "00_input.png",
        "01_gaussian_blur.png",
        "02_threshold.png",
        "03_morphological_opening.png",
        "04_morphological_closing.png",
    ] {
        assert!(debug_dir.join(name).exists(), "missing {name}");
    }

    let closing = image::open(debug_dir.join("04_morphological_closing.png"))?.to_luma8();
    assert_eq!(closing, analysis.cleaned_mask);
    Ok(())
}

#[test]
fn test_debug_output_requires_empty_directory() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    std::fs::write(dir.path().join("leftover.txt"), "x")?;

    let result = VoidAnalyzer::default()
        .with_debug(dir.path())
        .analyze(&uniform_image(8, 8, 255));
    assert!(matches!(result, Err(VoidError::InvalidConfig(_))));
    Ok(())
}

#[test]
fn test_figure_is_saved() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("figure.png");

    let analysis = VoidAnalyzer::default().analyze(&block_image(30, 20, 180, 10, (10, 5), 8))?;
    figure::save_figure(&analysis, &path)?;

    let saved = image::open(&path)?;
    assert_eq!(saved.width(), figure::figure_width());
    assert_eq!(saved.height(), figure::figure_height());
    Ok(())
}
