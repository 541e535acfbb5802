//! Generation requests and the precondition checks applied before generation.
//!
//! Requests carry no identity and are built fresh per call. `validate()`
//! rejects values that would otherwise flow into the generators and produce
//! degenerate content (zero questions, empty subjects, and so on).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AttendanceRecord, GradeRecord, StudentRecord};
use crate::enums::{Difficulty, QuestionType};
use crate::errors::CoreError;

pub const MIN_GRADE_LEVEL: u8 = 1;
pub const MAX_GRADE_LEVEL: u8 = 12;
pub const MAX_LESSON_MINUTES: u32 = 240;
pub const MAX_ASSESSMENT_MINUTES: u32 = 300;
pub const MAX_QUESTIONS: u32 = 100;

/// Parameters for a lesson plan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LessonPlanRequest {
    pub subject: String,
    pub topic: String,
    pub grade_level: u8,
    pub duration_minutes: u32,
    /// Objectives supplied by the teacher. Used verbatim when non-empty.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Freeform context passed through to the remote prompt.
    #[serde(default)]
    pub context: Option<String>,
}

impl LessonPlanRequest {
    /// Check preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("subject", &self.subject)?;
        require_text("topic", &self.topic)?;
        require_grade(self.grade_level)?;
        require_range("duration_minutes", self.duration_minutes, 1, MAX_LESSON_MINUTES)
    }
}

/// Parameters for an assessment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssessmentRequest {
    pub subject: String,
    pub topic: String,
    pub grade_level: u8,
    pub question_count: u32,
    /// Requested question types, in priority order. Empty selects the
    /// default split.
    #[serde(default)]
    pub question_types: Vec<QuestionType>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

impl AssessmentRequest {
    /// Check preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("subject", &self.subject)?;
        require_text("topic", &self.topic)?;
        require_grade(self.grade_level)?;
        require_range("question_count", self.question_count, 1, MAX_QUESTIONS)?;
        if let Some(minutes) = self.duration_minutes {
            require_range("duration_minutes", minutes, 1, MAX_ASSESSMENT_MINUTES)?;
        }
        for (index, ty) in self.question_types.iter().enumerate() {
            if self.question_types[..index].contains(ty) {
                return Err(CoreError::Validation(format!(
                    "question_types lists '{ty}' more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Records to analyze for class insights.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InsightsRequest {
    #[serde(default)]
    pub attendance_records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub grade_records: Vec<GradeRecord>,
    #[serde(default)]
    pub student_records: Vec<StudentRecord>,
    /// Restrict the analysis to students in this class.
    #[serde(default)]
    pub class_id: Option<String>,
    /// Restrict grade records to this subject (case-insensitive).
    #[serde(default)]
    pub subject: Option<String>,
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

fn require_grade(grade_level: u8) -> Result<(), CoreError> {
    require_range(
        "grade_level",
        u32::from(grade_level),
        u32::from(MIN_GRADE_LEVEL),
        u32::from(MAX_GRADE_LEVEL),
    )
}

fn require_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), CoreError> {
    if !(min..=max).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
