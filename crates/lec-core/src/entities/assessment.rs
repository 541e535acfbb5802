use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CognitiveLevel, Difficulty, Provenance, QuestionType};

/// A generated assessment.
///
/// `total_marks` always equals the sum of question marks, and questions are
/// numbered `1..=n` with no gaps.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Assessment {
    pub title: String,
    pub subject: String,
    pub topic: String,
    pub grade_level: u8,
    pub difficulty: Difficulty,
    pub total_marks: u32,
    pub duration_minutes: u32,
    pub instructions: Vec<String>,
    pub questions: Vec<Question>,
    pub marking_scheme: Vec<MarkingSchemeEntry>,
    pub generated_at: DateTime<Utc>,
    pub provenance: Provenance,
}

impl Assessment {
    /// Sum of the marks carried by every question.
    #[must_use]
    pub fn marks_sum(&self) -> u32 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    /// Whether question numbers run `1..=n` in order.
    #[must_use]
    pub fn numbering_is_contiguous(&self) -> bool {
        self.questions
            .iter()
            .zip(1u32..)
            .all(|(question, expected)| question.number == expected)
    }
}

/// One assessment question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    /// 1-based position within the assessment.
    pub number: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    pub marks: u32,
    /// Exactly four entries for multiple choice; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
    pub cognitive_level: CognitiveLevel,
}

/// Marking guidance for a single question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MarkingSchemeEntry {
    pub question_number: u32,
    pub marks: u32,
    pub guidance: String,
}
