use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use lec_core::enums::{Difficulty, QuestionType};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Generate a lesson plan.
    Lesson(LessonArgs),
    /// Generate an assessment.
    Assessment(AssessmentArgs),
    /// Analyze attendance and grade records.
    Insights(InsightsArgs),
    /// List the known topics and materials for a subject.
    Topics(TopicsArgs),
    /// Print the JSON Schema of a request or content type.
    Schema(SchemaArgs),
    /// Run the credential-holding relay for the proxy transport.
    Relay(RelayArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LessonArgs {
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub topic: String,
    /// Grade level (1-12). Defaults to `general.default_grade_level`.
    #[arg(long)]
    pub grade: Option<u8>,
    /// Lesson length in minutes. Defaults to `general.default_duration_minutes`.
    #[arg(long)]
    pub duration: Option<u32>,
    /// Learning objective to use verbatim (repeatable).
    #[arg(long = "objective")]
    pub objectives: Vec<String>,
    /// Free-form notes passed to the model.
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AssessmentArgs {
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub topic: String,
    #[arg(long)]
    pub grade: Option<u8>,
    /// Number of questions. Defaults to `general.default_question_count`.
    #[arg(long)]
    pub count: Option<u32>,
    /// Question types, comma-separated (e.g. `mcq,essay`). Empty selects
    /// the default mix.
    #[arg(long = "type", value_delimiter = ',')]
    pub types: Vec<QuestionType>,
    #[arg(long, default_value = "medium")]
    pub difficulty: Difficulty,
    /// Time limit in minutes. Derived from the questions when omitted.
    #[arg(long)]
    pub duration: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct InsightsArgs {
    /// JSON file holding an insights request (records and optional filters).
    #[arg(long)]
    pub input: PathBuf,
    /// Restrict to one class, overriding the file.
    #[arg(long = "class")]
    pub class_id: Option<String>,
    /// Restrict grades to one subject, overriding the file.
    #[arg(long)]
    pub subject: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TopicsArgs {
    pub subject: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    LessonPlan,
    Assessment,
    Insights,
    LessonRequest,
    AssessmentRequest,
    InsightsRequest,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub kind: SchemaKind,
}

#[derive(Clone, Debug, Args)]
pub struct RelayArgs {
    /// Listen address, overriding `relay.bind_addr`.
    #[arg(long)]
    pub bind: Option<String>,
    /// Request path, overriding `relay.path`.
    #[arg(long)]
    pub path: Option<String>,
}
