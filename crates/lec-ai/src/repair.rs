//! Field-by-field repair of parsed model replies.
//!
//! A reply is accepted when it is a JSON object carrying at least one usable
//! content field (for assessments, the full requested number of questions). Every field that is missing or of the wrong shape is filled
//! from the local generator's output for the same request, so the result
//! always satisfies the entity invariants. Identity fields (subject, topic,
//! grade, duration, timing) always come from the request, never the reply.

use std::collections::BTreeSet;

use chrono::Utc;
use lec_core::entities::{Assessment, Insights, Intervention, LessonPlan, Question};
use lec_core::enums::{CognitiveLevel, Difficulty, InterventionKind, Provenance, QuestionType};
use lec_core::requests::{AssessmentRequest, LessonPlanRequest};
use lec_generator::assessment::{default_duration, instructions, marking_scheme};
use lec_generator::templates::{cognitive_level_for, marks_for};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AiError;

const MCQ_OPTION_COUNT: usize = 4;
const FILLER_OPTIONS: [&str; 4] = [
    "None of the above",
    "All of the above",
    "Not enough information",
    "Cannot be determined",
];

/// Repair a lesson plan reply.
///
/// # Errors
///
/// Returns [`AiError::Shape`] when the reply is not an object or carries none
/// of the lesson plan's content fields.
pub fn repair_lesson_plan(reply: &Value, request: &LessonPlanRequest) -> Result<LessonPlan, AiError> {
    let obj = as_object(reply, "lesson plan")?;
    let local = lec_generator::generate_lesson_plan(request);

    let mut used = 0usize;
    let mut text_field = |key: &str, default: String| {
        text(obj, key).inspect(|_| used += 1).unwrap_or(default)
    };
    let title = text_field("title", local.title);
    let introduction = text_field("introduction", local.introduction);
    let lesson_development = text_field("lesson_development", local.lesson_development);
    let assessment = text_field("assessment", local.assessment);
    let conclusion = text_field("conclusion", local.conclusion);
    let homework = text_field("homework", local.homework);

    let mut list_field = |key: &str, default: Vec<String>| {
        text_list(obj, key).inspect(|_| used += 1).unwrap_or(default)
    };
    let objectives = list_field("objectives", local.objectives);
    let materials = list_field("materials", local.materials);
    let activities = list_field("activities", local.activities);

    if used == 0 {
        return Err(AiError::Shape(
            "lesson plan reply has none of the expected fields".into(),
        ));
    }
    debug!(fields_from_reply = used, "repaired lesson plan reply");

    Ok(LessonPlan {
        title,
        subject: local.subject,
        topic: local.topic,
        grade_level: local.grade_level,
        duration_minutes: local.duration_minutes,
        objectives,
        materials,
        introduction,
        lesson_development,
        activities,
        assessment,
        conclusion,
        homework,
        timing: local.timing,
        generated_at: Utc::now(),
        provenance: Provenance::RemoteAi,
    })
}

/// Repair an assessment reply.
///
/// Questions keep the reply's order and are renumbered from 1. Entries that
/// are not objects or have no text are dropped, and anything beyond the
/// requested count is cut. Totals, the marking scheme, and (unless the reply
/// gives them) instructions are recomputed from the repaired questions.
///
/// # Errors
///
/// Returns [`AiError::Shape`] when the reply is not an object or yields fewer
/// usable questions than `request.question_count`.
pub fn repair_assessment(reply: &Value, request: &AssessmentRequest) -> Result<Assessment, AiError> {
    let obj = as_object(reply, "assessment")?;
    let subject = request.subject.trim();
    let topic = request.topic.trim();

    let questions: Vec<Question> = obj
        .get("questions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| repair_question(item, request.difficulty, topic))
                .take(usize::try_from(request.question_count).unwrap_or(usize::MAX))
                .zip(1u32..)
                .map(|(question, number)| Question { number, ..question })
                .collect()
        })
        .unwrap_or_default();

    if questions.len() < usize::try_from(request.question_count).unwrap_or(usize::MAX) {
        return Err(AiError::Shape(format!(
            "assessment reply has {} usable questions, {} requested",
            questions.len(),
            request.question_count
        )));
    }

    let total_marks = questions.iter().map(|q| q.marks).sum();
    let duration_minutes = request
        .duration_minutes
        .unwrap_or_else(|| default_duration(&questions));
    let instruction_lines = text_list(obj, "instructions")
        .unwrap_or_else(|| instructions(&questions, total_marks, duration_minutes));
    debug!(
        questions = questions.len(),
        requested = request.question_count,
        "repaired assessment reply"
    );

    Ok(Assessment {
        title: text(obj, "title").unwrap_or_else(|| format!("{subject} Assessment: {topic}")),
        subject: subject.to_string(),
        topic: topic.to_string(),
        grade_level: request.grade_level,
        difficulty: request.difficulty,
        total_marks,
        duration_minutes,
        instructions: instruction_lines,
        marking_scheme: marking_scheme(&questions),
        questions,
        generated_at: Utc::now(),
        provenance: Provenance::RemoteAi,
    })
}

/// Merge a reply's recommendations and interventions into locally computed
/// insights. The summary, breakdowns, and trends are kept from `local`.
///
/// # Errors
///
/// Returns [`AiError::Shape`] when the reply is not an object or carries
/// neither field in a usable form. An interventions list with no valid entry
/// counts as missing.
pub fn repair_insights(reply: &Value, local: Insights) -> Result<Insights, AiError> {
    let obj = as_object(reply, "insights")?;

    let recommendations = text_list(obj, "recommendations");
    let interventions = obj
        .get("interventions")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(repair_intervention).collect::<Vec<_>>())
        .filter(|items| !items.is_empty());

    if recommendations.is_none() && interventions.is_none() {
        return Err(AiError::Shape(
            "insights reply has neither recommendations nor interventions".into(),
        ));
    }

    Ok(Insights {
        recommendations: recommendations.unwrap_or(local.recommendations),
        interventions: interventions.unwrap_or(local.interventions),
        generated_at: Utc::now(),
        provenance: Provenance::RemoteAi,
        ..local
    })
}

fn repair_question(item: &Value, difficulty: Difficulty, topic: &str) -> Option<Question> {
    let obj = item.as_object()?;
    let question_text = text(obj, "text").or_else(|| text(obj, "question"))?;
    let mut options = text_list(obj, "options");

    let question_type = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<QuestionType>().ok())
        .unwrap_or(if options.as_ref().is_some_and(|o| o.len() > 1) {
            QuestionType::MultipleChoice
        } else {
            QuestionType::ShortAnswer
        });

    let marks = obj
        .get("marks")
        .and_then(Value::as_u64)
        .and_then(|m| u32::try_from(m).ok())
        .filter(|m| *m > 0)
        .unwrap_or_else(|| marks_for(question_type, difficulty));

    let cognitive_level = obj
        .get("cognitive_level")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<CognitiveLevel>().ok())
        .unwrap_or_else(|| cognitive_level_for(question_type, difficulty));

    let mut correct_answer = text(obj, "correct_answer").or_else(|| text(obj, "answer"));
    if question_type == QuestionType::MultipleChoice {
        let (fixed_options, fixed_answer) =
            repair_options(options.take().unwrap_or_default(), correct_answer.take());
        options = Some(fixed_options);
        correct_answer = Some(fixed_answer);
    } else {
        options = None;
    }

    Some(Question {
        number: 0,
        question_type,
        text: question_text,
        marks,
        options,
        correct_answer: correct_answer
            .unwrap_or_else(|| format!("Open response on {topic}; see marking guidance.")),
        explanation: text(obj, "explanation")
            .unwrap_or_else(|| format!("Credit answers that show understanding of {topic}.")),
        cognitive_level,
    })
}

/// Force exactly four options with the answer among them. A letter answer
/// (`"B"`, `"c)"`) is resolved to the option at that position.
fn repair_options(mut options: Vec<String>, answer: Option<String>) -> (Vec<String>, String) {
    let mut seen = BTreeSet::new();
    options.retain(|o| seen.insert(o.clone()));
    options.truncate(MCQ_OPTION_COUNT);

    let answer = answer
        .map(|a| resolve_letter(&a, &options).unwrap_or(a))
        .or_else(|| options.first().cloned())
        .unwrap_or_else(|| FILLER_OPTIONS[0].to_string());

    if !options.contains(&answer) {
        if options.len() == MCQ_OPTION_COUNT {
            options[MCQ_OPTION_COUNT - 1].clone_from(&answer);
        } else {
            options.push(answer.clone());
        }
    }
    for filler in FILLER_OPTIONS {
        if options.len() == MCQ_OPTION_COUNT {
            break;
        }
        if !options.iter().any(|o| o == filler) {
            options.push(filler.to_string());
        }
    }
    (options, answer)
}

fn resolve_letter(answer: &str, options: &[String]) -> Option<String> {
    let trimmed = answer.trim().trim_end_matches([')', '.', ':']);
    let mut chars = trimmed.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !('A'..='D').contains(&letter) {
        return None;
    }
    options.get(usize::from(letter as u8 - b'A')).cloned()
}

fn repair_intervention(item: &Value) -> Option<Intervention> {
    let obj = item.as_object()?;
    let action = text(obj, "action")?;
    Some(Intervention {
        kind: obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<InterventionKind>().ok())
            .unwrap_or(InterventionKind::ClassWide),
        target: text(obj, "target").unwrap_or_else(|| "Whole class".to_string()),
        action,
    })
}

fn as_object<'a>(reply: &'a Value, kind: &str) -> Result<&'a Map<String, Value>, AiError> {
    reply.as_object().ok_or_else(|| {
        AiError::Shape(format!(
            "expected a JSON object for the {kind}, got {}",
            json_type(reply)
        ))
    })
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Non-blank string field, trimmed.
fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Array field keeping its non-blank strings. `None` when the field is
/// missing, not an array, or has no usable entry.
fn text_list(obj: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = obj
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}
