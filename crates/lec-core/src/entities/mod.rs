//! Content entities produced by the generation paths.
//!
//! Entities are plain records with no identity. Nothing in Lectern persists
//! them. All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! JSON output and schema validation.

mod assessment;
mod insights;
mod lesson;

pub use assessment::{Assessment, MarkingSchemeEntry, Question};
pub use insights::{
    AttendanceBreakdown, AttendanceInsights, AttendanceRecord, GradeBands, GradeRecord, Insights,
    InsightsSummary, Intervention, PerformanceBreakdown, PerformanceInsights, StudentRecord,
    Trends,
};
pub use lesson::{LessonPlan, LessonTiming};
