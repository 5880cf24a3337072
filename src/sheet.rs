use serde::{Deserialize, Serialize};

/// Coverage-ratio cutoffs for classifying a bubble as filled or ambiguous.
/// Anything below `ambiguous` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FillThresholds {
    pub filled: f32,
    pub ambiguous: f32,
}

impl Default for FillThresholds {
    fn default() -> Self {
        Self {
            filled: 0.5,
            ambiguous: 0.2,
        }
    }
}

/// Tunables for one sheet layout. The defaults match a ~200 DPI scan with
/// four options per question; sheets scanned at other resolutions need the
/// area band adjusted to their bubble size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetConfig {
    /// Exclusive lower bound on a bubble's bounding-box area in pixels.
    pub min_bubble_area: u32,
    /// Exclusive upper bound on a bubble's bounding-box area in pixels.
    pub max_bubble_area: u32,
    /// Inclusive bounds on width/height; bubbles are near-square.
    pub min_aspect_ratio: f32,
    pub max_aspect_ratio: f32,
    /// Options per question; option letters are assigned by position.
    pub options_per_question: usize,
    /// Bubbles whose tops are within this many pixels of a row's first
    /// bubble belong to that row.
    pub row_tolerance: i32,
    /// Sigma of the Gaussian smoothing applied before thresholding.
    pub blur_sigma: f32,
    pub fill_thresholds: FillThresholds,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            min_bubble_area: 200,
            max_bubble_area: 500,
            min_aspect_ratio: 0.8,
            max_aspect_ratio: 1.2,
            options_per_question: 4,
            row_tolerance: 12,
            blur_sigma: 1.0,
            fill_thresholds: FillThresholds::default(),
        }
    }
}

/// The letter assigned to an option by its left-to-right position within a
/// group: 0 = A, 1 = B, and so on.
pub fn option_letter(index: usize) -> char {
    debug_assert!(index < 26, "option index out of the letter alphabet");
    (b'A' + index as u8) as char
}
