use std::collections::BTreeMap;

use imageproc::rect::Rect;
use logging_timer::time;

use crate::bubbles::BubbleCandidate;
use crate::grid::OptionGroup;
use crate::image_utils::InkMask;
use crate::sheet::{option_letter, FillThresholds};
use crate::types::{DetectedAnswer, FillClass, FillResult};

/// One bubble's position and its scored fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredBubbleMark {
    pub bounds: Rect,
    pub fill: FillResult,
}

/// One question's bubbles with their scores, in option order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOptionGroup {
    pub question: u32,
    pub marks: Vec<ScoredBubbleMark>,
}

pub fn classify_fill(coverage: f32, thresholds: &FillThresholds) -> FillClass {
    if coverage > thresholds.filled {
        FillClass::Filled
    } else if coverage >= thresholds.ambiguous {
        FillClass::Ambiguous
    } else {
        FillClass::Empty
    }
}

/// Score one bubble by the fraction of its bounding box covered in ink.
pub fn score_bubble(
    mask: &InkMask,
    candidate: &BubbleCandidate,
    thresholds: &FillThresholds,
) -> FillResult {
    let coverage = mask.coverage_in(&candidate.bounds);
    FillResult {
        coverage,
        class: classify_fill(coverage, thresholds),
    }
}

#[time]
/// Score every bubble of every group. Questions are numbered 1-based in
/// group order.
pub fn score_option_groups(
    mask: &InkMask,
    groups: &[OptionGroup],
    thresholds: &FillThresholds,
) -> Vec<ScoredOptionGroup> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| ScoredOptionGroup {
            question: index as u32 + 1,
            marks: group
                .bubbles
                .iter()
                .map(|bubble| ScoredBubbleMark {
                    bounds: bubble.bounds,
                    fill: score_bubble(mask, bubble, thresholds),
                })
                .collect(),
        })
        .collect()
}

/// Reduce one group's fills to an answer. Two or more filled bubbles mean
/// the question was multiple-marked; exactly one filled bubble selects that
/// position's letter; otherwise the question is unanswered. An ambiguous
/// fill never counts as a mark; it only shows up in review overlays.
pub fn resolve_group(fills: &[FillResult]) -> DetectedAnswer {
    let mut filled = fills
        .iter()
        .enumerate()
        .filter(|(_, fill)| fill.class == FillClass::Filled);

    match (filled.next(), filled.next()) {
        (None, _) => DetectedAnswer::Unanswered,
        (Some((index, _)), None) => DetectedAnswer::Selected(option_letter(index)),
        (Some(_), Some(_)) => DetectedAnswer::MultipleMarked,
    }
}

/// Resolve every scored group into the per-question answer map.
pub fn resolve_answers(scored: &[ScoredOptionGroup]) -> BTreeMap<u32, DetectedAnswer> {
    scored
        .iter()
        .map(|group| {
            let fills = group
                .marks
                .iter()
                .map(|mark| mark.fill)
                .collect::<Vec<FillResult>>();
            (group.question, resolve_group(&fills))
        })
        .collect()
}
