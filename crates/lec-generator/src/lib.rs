//! # lec-generator
//!
//! Local content generation for Lectern. Everything here is pure template
//! expansion over the static tables in [`templates`]: no I/O, no randomness,
//! and the same inputs always produce the same text.
//!
//! - [`lesson`]: objectives, materials, time allocation, lesson plans
//! - [`assessment`]: question-type distribution, per-type question
//!   generators, assessments
//! - [`insights`]: attendance and performance aggregation with fixed
//!   classification thresholds

pub mod assessment;
pub mod insights;
pub mod lesson;
pub mod templates;

pub use assessment::{distribute_question_types, generate_assessment};
pub use insights::{generate_attendance_insights, generate_insights, generate_performance_insights};
pub use lesson::{generate_lesson_content, generate_lesson_plan, generate_materials, generate_objectives};
