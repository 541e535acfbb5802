use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Provenance;

/// A generated lesson plan.
///
/// After generation every list field is non-empty, whichever path produced it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LessonPlan {
    pub title: String,
    pub subject: String,
    pub topic: String,
    pub grade_level: u8,
    pub duration_minutes: u32,
    pub objectives: Vec<String>,
    pub materials: Vec<String>,
    pub introduction: String,
    pub lesson_development: String,
    pub activities: Vec<String>,
    pub assessment: String,
    pub conclusion: String,
    pub homework: String,
    pub timing: LessonTiming,
    pub generated_at: DateTime<Utc>,
    pub provenance: Provenance,
}

impl LessonPlan {
    /// Whether every list field carries at least one entry.
    #[must_use]
    pub fn lists_are_populated(&self) -> bool {
        !self.objectives.is_empty() && !self.materials.is_empty() && !self.activities.is_empty()
    }
}

/// Minutes allocated to each lesson section.
///
/// Each figure is rounded independently, so the parts may sum to slightly
/// more or less than the lesson duration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub struct LessonTiming {
    pub introduction_minutes: u32,
    pub development_minutes: u32,
    pub activities_minutes: u32,
    pub pair_work_minutes: u32,
    pub group_work_minutes: u32,
    pub individual_work_minutes: u32,
    pub conclusion_minutes: u32,
}
