use log::debug;
use logging_timer::time;

use crate::bubbles::BubbleCandidate;
use crate::sheet::SheetConfig;

/// The candidate bubbles for one question, exactly `options_per_question`
/// of them, ordered left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub bubbles: Vec<BubbleCandidate>,
}

/// The assembled question grid plus whatever did not fit. Group index
/// position is the question number minus one; numbering is sequential with
/// no gaps by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridAssembly {
    pub groups: Vec<OptionGroup>,
    /// Candidates left over from rows that did not divide evenly into
    /// groups, typically scan-edge artifacts. Dropped from grading.
    pub incomplete: Vec<BubbleCandidate>,
}

#[time]
/// Order candidates into (question, option) cells. Two passes: cluster into
/// rows by y-proximity, then sort each row left to right and split it into
/// consecutive groups of `options_per_question`.
///
/// This reconstructs the grid correctly only when bubbles of one question
/// share a narrow y-band and every row holds a whole number of questions.
/// Ragged rows or a skipped question desynchronize every group after them;
/// the assembler degrades to possibly-wrong groupings rather than failing.
pub fn assemble_grid(candidates: Vec<BubbleCandidate>, config: &SheetConfig) -> GridAssembly {
    if config.options_per_question == 0 {
        return GridAssembly {
            groups: Vec::new(),
            incomplete: candidates,
        };
    }

    let rows = cluster_rows(candidates, config.row_tolerance);

    let mut assembly = GridAssembly::default();
    for mut row in rows {
        row.sort_by_key(|candidate| candidate.bounds.left());

        let mut chunks = row.chunks_exact(config.options_per_question);
        for chunk in chunks.by_ref() {
            assembly.groups.push(OptionGroup {
                bubbles: chunk.to_vec(),
            });
        }

        let remainder = chunks.remainder();
        if !remainder.is_empty() {
            debug!(
                "dropping incomplete group of {} candidate(s) at y={}",
                remainder.len(),
                remainder[0].bounds.top()
            );
            assembly.incomplete.extend_from_slice(remainder);
        }
    }

    debug!(
        "assembled {} option groups, {} candidates dropped as incomplete",
        assembly.groups.len(),
        assembly.incomplete.len()
    );
    assembly
}

/// Group candidates into rows of similar vertical position. A candidate
/// joins the current row while its top is within `row_tolerance` of the
/// row's first member.
fn cluster_rows(mut candidates: Vec<BubbleCandidate>, row_tolerance: i32) -> Vec<Vec<BubbleCandidate>> {
    candidates.sort_by_key(|candidate| (candidate.bounds.top(), candidate.bounds.left()));

    let mut rows: Vec<Vec<BubbleCandidate>> = Vec::new();
    for candidate in candidates {
        match rows.last_mut() {
            Some(row) if candidate.bounds.top() - row[0].bounds.top() <= row_tolerance => {
                row.push(candidate);
            }
            _ => rows.push(vec![candidate]),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::rect::Rect;

    fn candidate(x: i32, y: i32) -> BubbleCandidate {
        BubbleCandidate::new(Rect::at(x, y).of_size(16, 16))
    }

    #[test]
    fn assembles_two_rows_of_one_question_each() {
        // shuffled input: order must come from position, not insertion
        let candidates = vec![
            candidate(160, 100),
            candidate(10, 10),
            candidate(60, 102),
            candidate(110, 11),
            candidate(10, 101),
            candidate(160, 9),
            candidate(110, 99),
            candidate(60, 10),
        ];

        let assembly = assemble_grid(candidates, &SheetConfig::default());
        assert_eq!(2, assembly.groups.len());
        assert!(assembly.incomplete.is_empty());

        let lefts = |group: &OptionGroup| {
            group
                .bubbles
                .iter()
                .map(|b| b.bounds.left())
                .collect::<Vec<i32>>()
        };
        assert_eq!(vec![10, 60, 110, 160], lefts(&assembly.groups[0]));
        assert_eq!(vec![10, 60, 110, 160], lefts(&assembly.groups[1]));
        assert_eq!(10, assembly.groups[0].bubbles[0].bounds.top());
        assert_eq!(101, assembly.groups[1].bubbles[0].bounds.top());
    }

    #[test]
    fn ragged_tops_within_tolerance_stay_in_one_row() {
        let candidates = vec![
            candidate(10, 50),
            candidate(60, 58),
            candidate(110, 53),
            candidate(160, 61),
        ];

        let assembly = assemble_grid(candidates, &SheetConfig::default());
        assert_eq!(1, assembly.groups.len());
        assert!(assembly.incomplete.is_empty());
    }

    #[test]
    fn a_row_with_two_questions_splits_into_two_groups() {
        let candidates = (0..8).map(|i| candidate(10 + i * 40, 30)).collect();

        let assembly = assemble_grid(candidates, &SheetConfig::default());
        assert_eq!(2, assembly.groups.len());
        assert_eq!(10, assembly.groups[0].bubbles[0].bounds.left());
        assert_eq!(170, assembly.groups[1].bubbles[0].bounds.left());
    }

    #[test]
    fn leftover_candidates_are_reported_as_incomplete() {
        let mut candidates: Vec<BubbleCandidate> =
            (0..4).map(|i| candidate(10 + i * 40, 30)).collect();
        // a fifth blob in the same row, and a lone artifact in its own row
        candidates.push(candidate(210, 32));
        candidates.push(candidate(10, 200));

        let assembly = assemble_grid(candidates, &SheetConfig::default());
        assert_eq!(1, assembly.groups.len());
        assert_eq!(2, assembly.incomplete.len());
        assert_eq!(210, assembly.incomplete[0].bounds.left());
        assert_eq!(200, assembly.incomplete[1].bounds.top());
    }

    #[test]
    fn no_candidates_yields_an_empty_assembly() {
        let assembly = assemble_grid(Vec::new(), &SheetConfig::default());
        assert!(assembly.groups.is_empty());
        assert!(assembly.incomplete.is_empty());
    }
}
