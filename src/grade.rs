use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::types::DetectedAnswer;

/// The authoritative mapping from question number to correct option letter.
/// Parsed from the same JSON shape the key file uses: an object of string
/// question numbers to letters, `{"1": "A", "2": "C", ...}`. Read-only for
/// the whole of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    entries: BTreeMap<u32, char>,
}

impl AnswerKey {
    pub fn new(entries: BTreeMap<u32, char>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, question: u32) -> Option<char> {
        self.entries.get(&question).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, char)> + '_ {
        self.entries.iter().map(|(&question, &letter)| (question, letter))
    }
}

impl Serialize for AnswerKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (question, letter) in &self.entries {
            map.serialize_entry(&question.to_string(), &letter.to_string())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut entries = BTreeMap::new();
        for (question, answer) in raw {
            let question = question
                .parse::<u32>()
                .map_err(|_| serde::de::Error::custom(format!("invalid question number: {}", question)))?;
            let answer = answer.trim();
            let mut chars = answer.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) if letter.is_ascii_alphabetic() => {
                    entries.insert(question, letter.to_ascii_uppercase());
                }
                _ => {
                    return Err(serde::de::Error::custom(format!(
                        "invalid answer for question {}: {:?}",
                        question, answer
                    )))
                }
            }
        }
        Ok(Self { entries })
    }
}

/// Score and per-question correctness for one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub score: u32,
    pub total: u32,
    pub per_question: BTreeMap<u32, bool>,
}

/// Compare detected answers to the key. The key defines which questions
/// count: a question is correct only when its detected answer is exactly
/// the key's letter, so unanswered and multiple-marked questions are always
/// wrong, and detected questions the key does not mention are ignored.
pub fn grade(detected: &BTreeMap<u32, DetectedAnswer>, key: &AnswerKey) -> GradeReport {
    let per_question = key
        .iter()
        .map(|(question, letter)| {
            let correct = detected.get(&question) == Some(&DetectedAnswer::Selected(letter));
            (question, correct)
        })
        .collect::<BTreeMap<u32, bool>>();

    GradeReport {
        score: per_question.values().filter(|&&correct| correct).count() as u32,
        total: key.len() as u32,
        per_question,
    }
}
