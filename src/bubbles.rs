use imageproc::contours::{find_contours_with_threshold, BorderType};
use imageproc::rect::Rect;
use log::debug;
use logging_timer::time;

use crate::geometry::{aspect_ratio, contour_bounding_rect};
use crate::image_utils::InkMask;
use crate::sheet::SheetConfig;

/// An ink region whose size and shape are consistent with an answer bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleCandidate {
    pub bounds: Rect,
}

impl BubbleCandidate {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    pub fn area(&self) -> u32 {
        self.bounds.width() * self.bounds.height()
    }

    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(&self.bounds)
    }
}

/// Whether a region's bounding rect could be a bubble: area inside the
/// configured band and roughly square. Both predicates must hold.
pub fn rect_could_be_bubble(config: &SheetConfig, rect: &Rect) -> bool {
    let area = rect.width() * rect.height();
    let aspect = aspect_ratio(rect);
    area > config.min_bubble_area
        && area < config.max_bubble_area
        && aspect >= config.min_aspect_ratio
        && aspect <= config.max_aspect_ratio
}

#[time]
/// Find external ink regions in the mask and keep the bubble-shaped ones.
/// Text, grid lines, and smudges fail the size or shape predicate and are
/// dropped without comment; missing a bubble is preferable to mistaking
/// noise for one. Finding nothing at all is a valid result.
pub fn find_bubble_candidates(mask: &InkMask, config: &SheetConfig) -> Vec<BubbleCandidate> {
    let contours = find_contours_with_threshold(mask.image(), 0);
    let candidates = contours
        .iter()
        .filter_map(|contour| {
            if contour.border_type != BorderType::Outer || contour.parent.is_some() {
                return None;
            }
            let bounds = contour_bounding_rect(contour);
            if rect_could_be_bubble(config, &bounds) {
                Some(BubbleCandidate::new(bounds))
            } else {
                None
            }
        })
        .collect::<Vec<BubbleCandidate>>();

    debug!(
        "{} of {} external regions look like bubbles",
        candidates.len(),
        contours
            .iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .count()
    );
    candidates
}
