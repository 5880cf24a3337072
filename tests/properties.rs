use std::collections::BTreeMap;

use proptest::prelude::*;

use omr_grader::grade::{grade, AnswerKey};
use omr_grader::marks::{classify_fill, resolve_group};
use omr_grader::sheet::{option_letter, FillThresholds};
use omr_grader::types::{DetectedAnswer, FillClass, FillResult};

fn detected_answer() -> impl Strategy<Value = DetectedAnswer> {
    prop_oneof![
        prop::sample::select(vec!['A', 'B', 'C', 'D']).prop_map(DetectedAnswer::Selected),
        Just(DetectedAnswer::Unanswered),
        Just(DetectedAnswer::MultipleMarked),
    ]
}

proptest! {
    #[test]
    fn resolution_follows_the_filled_count(
        coverages in prop::collection::vec(0.0f32..=1.0, 0..8)
    ) {
        let thresholds = FillThresholds::default();
        let fills = coverages
            .iter()
            .map(|&coverage| FillResult {
                coverage,
                class: classify_fill(coverage, &thresholds),
            })
            .collect::<Vec<FillResult>>();

        let filled = fills
            .iter()
            .enumerate()
            .filter(|(_, fill)| fill.class == FillClass::Filled)
            .map(|(i, _)| i)
            .collect::<Vec<usize>>();

        let expected = match filled.as_slice() {
            [] => DetectedAnswer::Unanswered,
            [index] => DetectedAnswer::Selected(option_letter(*index)),
            _ => DetectedAnswer::MultipleMarked,
        };
        prop_assert_eq!(expected, resolve_group(&fills));
    }

    #[test]
    fn grading_is_bounded_and_deterministic(
        key_entries in prop::collection::btree_map(
            1u32..60,
            prop::sample::select(vec!['A', 'B', 'C', 'D']),
            0..20,
        ),
        detected in prop::collection::btree_map(1u32..60, detected_answer(), 0..30),
    ) {
        let key = AnswerKey::new(key_entries.clone());
        let report = grade(&detected, &key);

        prop_assert_eq!(key_entries.len() as u32, report.total);
        prop_assert!(report.score <= report.total);
        prop_assert_eq!(key_entries.len(), report.per_question.len());

        // every graded question comes from the key, never from detection
        for question in report.per_question.keys() {
            prop_assert!(key_entries.contains_key(question));
        }

        prop_assert_eq!(report, grade(&detected, &key));
    }

    #[test]
    fn correct_questions_match_the_key_exactly(
        key_entries in prop::collection::btree_map(
            1u32..30,
            prop::sample::select(vec!['A', 'B', 'C', 'D']),
            1..15,
        ),
    ) {
        // detection that answers every keyed question correctly
        let detected = key_entries
            .iter()
            .map(|(&question, &letter)| (question, DetectedAnswer::Selected(letter)))
            .collect::<BTreeMap<u32, DetectedAnswer>>();

        let key = AnswerKey::new(key_entries);
        let report = grade(&detected, &key);
        prop_assert_eq!(report.total, report.score);
        prop_assert!(report.per_question.values().all(|&correct| correct));
    }
}
