pub mod bubbles;
pub mod debug;
pub mod geometry;
pub mod grade;
pub mod grid;
pub mod image_utils;
pub mod interpret;
pub mod marks;
pub mod sheet;
pub mod types;

pub use bubbles::{find_bubble_candidates, BubbleCandidate};
pub use grade::{grade, AnswerKey, GradeReport};
pub use grid::{assemble_grid, GridAssembly, OptionGroup};
pub use image_utils::{binarize, InkMask};
pub use interpret::{
    interpret_sheet, interpret_sheet_image, InvalidImageError, Options, SheetInterpretation,
};
pub use marks::{resolve_answers, resolve_group, score_option_groups, ScoredOptionGroup};
pub use sheet::{option_letter, FillThresholds, SheetConfig};
pub use types::{DetectedAnswer, FillClass, FillResult};
