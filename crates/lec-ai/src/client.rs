//! Remote content generation: prompt, one completion call, strict parse,
//! field-by-field repair.

use lec_core::entities::{Assessment, Insights, LessonPlan};
use lec_core::requests::{AssessmentRequest, InsightsRequest, LessonPlanRequest};
use tracing::{debug, instrument};

use crate::chat::SamplingParams;
use crate::error::AiError;
use crate::extract::extract_json;
use crate::prompts::{assessment_messages, insights_messages, lesson_plan_messages};
use crate::repair::{repair_assessment, repair_insights, repair_lesson_plan};
use crate::transport::ChatTransport;

/// Generates content through a chat model. Holds no state between calls
/// beyond the transport's connection pool.
#[derive(Debug, Clone)]
pub struct RemoteAiClient<T> {
    transport: T,
}

impl<T: ChatTransport> RemoteAiClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// # Errors
    ///
    /// Any transport, parse, or shape failure, unretried.
    #[instrument(skip_all, fields(subject = %request.subject, topic = %request.topic))]
    pub async fn generate_lesson_plan(&self, request: &LessonPlanRequest) -> Result<LessonPlan, AiError> {
        let messages = lesson_plan_messages(request);
        let reply = self
            .transport
            .complete(&messages, &SamplingParams::LESSON_PLAN)
            .await?;
        debug!(reply_len = reply.len(), "lesson plan reply received");
        repair_lesson_plan(&extract_json(&reply)?, request)
    }

    /// # Errors
    ///
    /// Any transport, parse, or shape failure, unretried.
    #[instrument(skip_all, fields(subject = %request.subject, topic = %request.topic))]
    pub async fn generate_assessment(&self, request: &AssessmentRequest) -> Result<Assessment, AiError> {
        let messages = assessment_messages(request);
        let reply = self
            .transport
            .complete(&messages, &SamplingParams::ASSESSMENT)
            .await?;
        debug!(reply_len = reply.len(), "assessment reply received");
        repair_assessment(&extract_json(&reply)?, request)
    }

    /// The numbers are computed locally; the model contributes the
    /// recommendations and interventions.
    ///
    /// # Errors
    ///
    /// Any transport, parse, or shape failure, unretried.
    #[instrument(skip_all, fields(attendance = request.attendance_records.len(), grades = request.grade_records.len()))]
    pub async fn generate_insights(&self, request: &InsightsRequest) -> Result<Insights, AiError> {
        let local = lec_generator::generate_insights(request);
        let messages = insights_messages(&local);
        let reply = self
            .transport
            .complete(&messages, &SamplingParams::INSIGHTS)
            .await?;
        debug!(reply_len = reply.len(), "insights reply received");
        repair_insights(&extract_json(&reply)?, local)
    }
}
