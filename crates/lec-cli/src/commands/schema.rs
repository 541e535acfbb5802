use lec_core::entities::{Assessment, Insights, LessonPlan};
use lec_core::requests::{AssessmentRequest, InsightsRequest, LessonPlanRequest};
use schemars::schema_for;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaKind};
use crate::output::output;

/// Handle `lectern schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(args.kind)?, flags.format)
}

pub fn schema(kind: SchemaKind) -> anyhow::Result<Value> {
    let schema = match kind {
        SchemaKind::LessonPlan => schema_for!(LessonPlan),
        SchemaKind::Assessment => schema_for!(Assessment),
        SchemaKind::Insights => schema_for!(Insights),
        SchemaKind::LessonRequest => schema_for!(LessonPlanRequest),
        SchemaKind::AssessmentRequest => schema_for!(AssessmentRequest),
        SchemaKind::InsightsRequest => schema_for!(InsightsRequest),
    };
    Ok(serde_json::to_value(schema)?)
}
