use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::GrayImage;
use logging_timer::time;
use thiserror::Error;

use crate::bubbles::{find_bubble_candidates, BubbleCandidate};
use crate::debug::{
    draw_candidates_debug_image_mut, draw_scored_marks_debug_image_mut, ImageDebugWriter,
};
use crate::grid::assemble_grid;
use crate::image_utils::binarize;
use crate::marks::{resolve_answers, score_option_groups, ScoredOptionGroup};
use crate::sheet::SheetConfig;
use crate::types::DetectedAnswer;

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub debug: bool,
    pub config: SheetConfig,
}

/// The sheet image could not be decoded or has no pixels. Fatal for this
/// sheet only; a batch caller should log it and move on to the next sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to load sheet image: {path}")]
pub struct InvalidImageError {
    pub path: PathBuf,
}

/// Everything detected on one sheet. All of it is ephemeral; nothing
/// carries over between sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetInterpretation {
    /// Question number to resolved answer, numbered 1-based in grid order.
    pub answers: BTreeMap<u32, DetectedAnswer>,
    /// Per-question scored bubbles, for review or overlay rendering.
    pub groups: Vec<ScoredOptionGroup>,
    /// Candidates dropped because their row did not divide into whole
    /// groups.
    pub incomplete: Vec<BubbleCandidate>,
}

#[time]
pub fn load_sheet_image(path: &Path) -> Result<GrayImage, InvalidImageError> {
    let img = image::open(path)
        .map_err(|_| InvalidImageError {
            path: path.to_path_buf(),
        })?
        .into_luma8();

    if img.width() == 0 || img.height() == 0 {
        return Err(InvalidImageError {
            path: path.to_path_buf(),
        });
    }

    Ok(img)
}

#[time]
/// Load a sheet image from disk and run the detection pipeline on it.
pub fn interpret_sheet(path: &Path, options: &Options) -> Result<SheetInterpretation, InvalidImageError> {
    let img = load_sheet_image(path)?;

    let debug = if options.debug {
        ImageDebugWriter::new(path.to_path_buf(), img.clone())
    } else {
        ImageDebugWriter::disabled()
    };

    Ok(interpret_sheet_image(&img, &options.config, &debug))
}

#[time]
/// Run the detection pipeline on an already-decoded grayscale sheet:
/// binarize, find bubble candidates, assemble the question grid, score each
/// bubble's fill, and resolve per-question answers. Pure relative to the
/// input; debug overlays are the only side output and never feed back into
/// detection.
pub fn interpret_sheet_image(
    img: &GrayImage,
    config: &SheetConfig,
    debug: &ImageDebugWriter,
) -> SheetInterpretation {
    if img.width() == 0 || img.height() == 0 {
        return SheetInterpretation::default();
    }

    let mask = binarize(img, config.blur_sigma);
    let candidates = find_bubble_candidates(&mask, config);
    debug.write("candidates", |canvas| {
        draw_candidates_debug_image_mut(canvas, &candidates);
    });

    let assembly = assemble_grid(candidates, config);
    let groups = score_option_groups(&mask, &assembly.groups, &config.fill_thresholds);
    debug.write("scored_bubbles", |canvas| {
        draw_scored_marks_debug_image_mut(canvas, &groups);
    });

    let answers = resolve_answers(&groups);

    SheetInterpretation {
        answers,
        groups,
        incomplete: assembly.incomplete,
    }
}
