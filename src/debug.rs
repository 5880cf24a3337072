use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use log::{error, info};

use crate::bubbles::BubbleCandidate;
use crate::image_utils::{GREEN, RAINBOW, RED, YELLOW};
use crate::marks::ScoredOptionGroup;
use crate::types::FillClass;

/// Creates a path for a debug image.
pub fn debug_image_path(base: &Path, label: &str) -> PathBuf {
    let mut result = PathBuf::from(base);
    result.set_file_name(format!(
        "{}_debug_{}.png",
        base.file_stem().unwrap_or_default().to_str().unwrap_or_default(),
        label
    ));
    result
}

/// Writes debug images next to the input image when enabled; does nothing
/// otherwise, so pipeline code can draw unconditionally.
#[derive(Debug, Clone)]
pub struct ImageDebugWriter {
    input: Option<(PathBuf, RgbImage)>,
}

impl ImageDebugWriter {
    pub fn new(input_path: PathBuf, input_image: GrayImage) -> Self {
        Self {
            input: Some((
                input_path,
                DynamicImage::ImageLuma8(input_image).to_rgb8(),
            )),
        }
    }

    pub const fn disabled() -> Self {
        Self { input: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.input.is_some()
    }

    pub fn write(&self, label: &str, draw: impl FnOnce(&mut RgbImage)) {
        if let Some((input_path, input_image)) = &self.input {
            let mut canvas = input_image.clone();
            draw(&mut canvas);
            let output_path = debug_image_path(input_path, label);
            match canvas.save(&output_path) {
                Ok(()) => info!("wrote debug image: {}", output_path.display()),
                Err(e) => error!(
                    "unable to write debug image {}: {}",
                    output_path.display(),
                    e
                ),
            }
        }
    }
}

/// Draws every bubble candidate, cycling colors so neighbors are
/// distinguishable.
pub fn draw_candidates_debug_image_mut(canvas: &mut RgbImage, candidates: &[BubbleCandidate]) {
    for (i, candidate) in candidates.iter().enumerate() {
        draw_filled_rect_mut(canvas, candidate.bounds, RAINBOW[i % RAINBOW.len()]);
    }
}

/// Outlines every scored bubble: green for filled, yellow for ambiguous,
/// red for empty. Purely for human review; grading never reads this.
pub fn draw_scored_marks_debug_image_mut(canvas: &mut RgbImage, scored: &[ScoredOptionGroup]) {
    for group in scored {
        for mark in &group.marks {
            let color: Rgb<u8> = match mark.fill.class {
                FillClass::Filled => GREEN,
                FillClass::Ambiguous => YELLOW,
                FillClass::Empty => RED,
            };
            draw_hollow_rect_mut(canvas, mark.bounds, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_path_keeps_the_directory_and_labels_the_stem() {
        assert_eq!(
            PathBuf::from("/scans/sheet_01_debug_candidates.png"),
            debug_image_path(Path::new("/scans/sheet_01.png"), "candidates")
        );
    }

    #[test]
    fn disabled_writer_never_draws() {
        let writer = ImageDebugWriter::disabled();
        let mut drawn = false;
        writer.write("anything", |_| drawn = true);
        assert!(!drawn);
        assert!(!writer.is_enabled());
    }
}
