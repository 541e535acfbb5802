//! Prompt construction. Every request is exactly two messages: a system
//! instruction and a user prompt that embeds the request parameters and the
//! JSON shape the reply must follow.

use std::fmt::Write as _;

use lec_core::entities::Insights;
use lec_core::requests::{AssessmentRequest, LessonPlanRequest};

use crate::chat::ChatMessage;

const SYSTEM_PROMPT: &str = "You are an experienced teacher and curriculum designer. \
You write clear, age-appropriate classroom material aligned to the learner's grade. \
Always reply with a single valid JSON object and nothing else: no prose, no Markdown.";

const LESSON_SHAPE: &str = r#"{
  "title": string,
  "objectives": [string],
  "materials": [string],
  "introduction": string,
  "lesson_development": string,
  "activities": [string],
  "assessment": string,
  "conclusion": string,
  "homework": string
}"#;

const ASSESSMENT_SHAPE: &str = r#"{
  "title": string,
  "instructions": [string],
  "questions": [{
    "type": "multiple_choice" | "short_answer" | "essay" | "problem_solving",
    "text": string,
    "marks": integer,
    "options": [string, string, string, string] (multiple_choice only),
    "correct_answer": string,
    "explanation": string,
    "cognitive_level": "remember" | "understand" | "apply" | "analyze" | "evaluate" | "create"
  }]
}"#;

const INSIGHTS_SHAPE: &str = r#"{
  "recommendations": [string],
  "interventions": [{
    "type": "attendance" | "academic" | "class_wide",
    "target": string,
    "action": string
  }]
}"#;

#[must_use]
pub fn lesson_plan_messages(request: &LessonPlanRequest) -> Vec<ChatMessage> {
    let mut prompt = format!(
        "Create a {minutes}-minute lesson plan for Grade {grade} {subject} on the topic \"{topic}\".\n",
        minutes = request.duration_minutes,
        grade = request.grade_level,
        subject = request.subject.trim(),
        topic = request.topic.trim(),
    );
    if !request.objectives.is_empty() {
        prompt.push_str("Use these learning objectives:\n");
        for objective in &request.objectives {
            let _ = writeln!(prompt, "- {}", objective.trim());
        }
    }
    if let Some(context) = request.context.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        let _ = writeln!(prompt, "Class context: {context}");
    }
    prompt.push_str(
        "Include pair, group, and individual activities. Every list must have at least one \
         entry.\nReply with JSON of this shape:\n",
    );
    prompt.push_str(LESSON_SHAPE);

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

#[must_use]
pub fn assessment_messages(request: &AssessmentRequest) -> Vec<ChatMessage> {
    let types = if request.question_types.is_empty() {
        "a mix of multiple choice, short answer, and essay".to_string()
    } else {
        request
            .question_types
            .iter()
            .map(|ty| ty.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut prompt = format!(
        "Write a {difficulty} assessment for Grade {grade} {subject} on \"{topic}\" with exactly \
         {count} questions using these question types: {types}.\n",
        difficulty = request.difficulty,
        grade = request.grade_level,
        subject = request.subject.trim(),
        topic = request.topic.trim(),
        count = request.question_count,
    );
    if let Some(minutes) = request.duration_minutes {
        let _ = writeln!(prompt, "Learners have {minutes} minutes.");
    }
    prompt.push_str(
        "Multiple choice questions have exactly four options, one of which is the correct \
         answer.\nReply with JSON of this shape:\n",
    );
    prompt.push_str(ASSESSMENT_SHAPE);

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

/// Insights prompts carry the locally computed figures; the model only
/// writes recommendations and interventions.
#[must_use]
pub fn insights_messages(local: &Insights) -> Vec<ChatMessage> {
    let mut prompt = format!(
        "A class of {students} students has an attendance rate of {attendance}% and an average \
         score of {performance}% (status: {status}).\n",
        students = local.summary.total_students,
        attendance = local.summary.attendance_rate_percent,
        performance = local.summary.average_performance_percent,
        status = local.summary.status,
    );
    if let Some(breakdown) = local.attendance_insights.breakdown() {
        if !breakdown.chronic_absentees.is_empty() {
            let _ = writeln!(
                prompt,
                "Frequently absent: {}.",
                breakdown.chronic_absentees.join(", ")
            );
        }
        for pattern in &breakdown.patterns {
            let _ = writeln!(prompt, "Pattern: {pattern}.");
        }
    }
    if let Some(breakdown) = local.performance_insights.breakdown() {
        if !breakdown.struggling_students.is_empty() {
            let _ = writeln!(
                prompt,
                "Struggling: {}.",
                breakdown.struggling_students.join(", ")
            );
        }
    }
    for note in &local.trends.notes {
        let _ = writeln!(prompt, "Trend: {note}.");
    }
    prompt.push_str(
        "Suggest practical recommendations for the teacher and specific interventions.\n\
         Reply with JSON of this shape:\n",
    );
    prompt.push_str(INSIGHTS_SHAPE);

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}
