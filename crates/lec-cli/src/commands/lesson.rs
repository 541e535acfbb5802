use lec_ai::AnyTransport;
use lec_config::GeneralConfig;
use lec_core::requests::LessonPlanRequest;
use lec_service::ContentService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LessonArgs;
use crate::output::output;

/// Handle `lectern lesson`.
pub async fn handle(
    args: &LessonArgs,
    service: &ContentService<AnyTransport>,
    general: &GeneralConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = build_request(args, general);
    let report = service.generate_lesson_plan(&request).await?;
    output(&report, flags.format)
}

pub fn build_request(args: &LessonArgs, general: &GeneralConfig) -> LessonPlanRequest {
    LessonPlanRequest {
        subject: args.subject.clone(),
        topic: args.topic.clone(),
        grade_level: args.grade.unwrap_or(general.default_grade_level),
        duration_minutes: args.duration.unwrap_or(general.default_duration_minutes),
        objectives: args.objectives.clone(),
        context: args.context.clone(),
    }
}
