use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How much of a bubble's bounding box is covered in ink, and what that
/// coverage means under the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillResult {
    pub coverage: f32,
    pub class: FillClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillClass {
    Filled,
    Ambiguous,
    Empty,
}

/// The resolved answer for a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectedAnswer {
    Selected(char),
    Unanswered,
    MultipleMarked,
}

impl Display for DetectedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectedAnswer::Selected(letter) => write!(f, "{}", letter),
            DetectedAnswer::Unanswered => write!(f, "unanswered"),
            DetectedAnswer::MultipleMarked => write!(f, "multiple"),
        }
    }
}

impl Serialize for DetectedAnswer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            DetectedAnswer::Selected(letter) => serializer.serialize_str(&letter.to_string()),
            DetectedAnswer::Unanswered => serializer.serialize_none(),
            DetectedAnswer::MultipleMarked => serializer.serialize_str("multiple"),
        }
    }
}

impl<'de> Deserialize<'de> for DetectedAnswer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        match value.as_deref() {
            None => Ok(DetectedAnswer::Unanswered),
            Some("multiple") => Ok(DetectedAnswer::MultipleMarked),
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) if letter.is_ascii_alphabetic() => {
                        Ok(DetectedAnswer::Selected(letter.to_ascii_uppercase()))
                    }
                    _ => Err(serde::de::Error::custom(format!(
                        "invalid detected answer: {}",
                        s
                    ))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_answers_like_the_key_file() {
        assert_eq!(
            serde_json::to_string(&DetectedAnswer::Selected('A')).unwrap(),
            r#""A""#
        );
        assert_eq!(
            serde_json::to_string(&DetectedAnswer::Unanswered).unwrap(),
            "null"
        );
        assert_eq!(
            serde_json::to_string(&DetectedAnswer::MultipleMarked).unwrap(),
            r#""multiple""#
        );
    }

    #[test]
    fn deserializes_answers() {
        assert_eq!(
            serde_json::from_str::<DetectedAnswer>(r#""b""#).unwrap(),
            DetectedAnswer::Selected('B')
        );
        assert_eq!(
            serde_json::from_str::<DetectedAnswer>("null").unwrap(),
            DetectedAnswer::Unanswered
        );
        assert_eq!(
            serde_json::from_str::<DetectedAnswer>(r#""multiple""#).unwrap(),
            DetectedAnswer::MultipleMarked
        );
        assert!(serde_json::from_str::<DetectedAnswer>(r#""AB""#).is_err());
    }
}
