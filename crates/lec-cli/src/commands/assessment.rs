use lec_ai::AnyTransport;
use lec_config::GeneralConfig;
use lec_core::requests::AssessmentRequest;
use lec_service::ContentService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AssessmentArgs;
use crate::output::output;

/// Handle `lectern assessment`.
pub async fn handle(
    args: &AssessmentArgs,
    service: &ContentService<AnyTransport>,
    general: &GeneralConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = build_request(args, general);
    let report = service.generate_assessment(&request).await?;
    output(&report, flags.format)
}

pub fn build_request(args: &AssessmentArgs, general: &GeneralConfig) -> AssessmentRequest {
    AssessmentRequest {
        subject: args.subject.clone(),
        topic: args.topic.clone(),
        grade_level: args.grade.unwrap_or(general.default_grade_level),
        question_count: args.count.unwrap_or(general.default_question_count),
        question_types: args.types.clone(),
        difficulty: args.difficulty,
        duration_minutes: args.duration,
    }
}
