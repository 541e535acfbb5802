//! Local lesson plan generation.
//!
//! Time is split 15% introduction, 50% development, 25% activities (itself
//! split 40/35/25 across pair, group, and individual work) and 10% conclusion.
//! Each share is rounded to the nearest minute on its own; the parts are not
//! re-normalized, so their sum can drift from the total by a minute or two.

use chrono::Utc;
use lec_core::entities::{LessonPlan, LessonTiming};
use lec_core::enums::{CognitiveLevel, Provenance};
use lec_core::requests::LessonPlanRequest;

use crate::templates::{next_topic, subject_materials, verb_for_grade};

const CLOSING_OBJECTIVE: &str =
    "Students should be able to participate actively and collaborate with peers during class activities";

/// Sections of a lesson body, produced together so the prose and the minute
/// allocation stay in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonContent {
    pub introduction: String,
    pub lesson_development: String,
    pub activities: Vec<String>,
    pub assessment: String,
    pub conclusion: String,
    pub homework: String,
    pub timing: LessonTiming,
}

/// Four learning objectives: understand, apply, analyze, then a fixed closing
/// statement.
#[must_use]
pub fn generate_objectives(subject: &str, topic: &str, grade_level: u8) -> Vec<String> {
    let understand = verb_for_grade(CognitiveLevel::Understand, grade_level);
    let apply = verb_for_grade(CognitiveLevel::Apply, grade_level);
    let analyze = verb_for_grade(CognitiveLevel::Analyze, grade_level);

    vec![
        format!("Students should be able to {understand} the key concepts of {topic} in {subject}"),
        format!("Students should be able to {apply} their knowledge of {topic} to solve problems"),
        format!(
            "Students should be able to {analyze} how {topic} relates to other areas of {subject}"
        ),
        CLOSING_OBJECTIVE.to_string(),
    ]
}

/// Base materials followed by the subject's extension list.
#[must_use]
pub fn generate_materials(subject: &str, topic: &str, grade_level: u8) -> Vec<String> {
    let mut materials = vec![
        "Whiteboard and markers".to_string(),
        format!("{subject} textbook for Grade {grade_level}"),
        "Exercise books and pens".to_string(),
        format!("Charts and visual aids on {topic}"),
    ];
    materials.extend(subject_materials(subject).iter().map(ToString::to_string));
    materials
}

/// Allocate lesson minutes across sections.
#[must_use]
pub const fn allocate_time(duration_minutes: u32) -> LessonTiming {
    let activities_minutes = share(duration_minutes, 25);

    LessonTiming {
        introduction_minutes: share(duration_minutes, 15),
        development_minutes: share(duration_minutes, 50),
        activities_minutes,
        pair_work_minutes: share(activities_minutes, 40),
        group_work_minutes: share(activities_minutes, 35),
        individual_work_minutes: share(activities_minutes, 25),
        conclusion_minutes: share(duration_minutes, 10),
    }
}

/// `percent` (at most 100) of `total`, rounded to the nearest minute
/// (halves round up). Split by hundreds so no intermediate exceeds `total`.
const fn share(total: u32, percent: u32) -> u32 {
    (total / 100) * percent + ((total % 100) * percent + 50) / 100
}

/// Expand the lesson body templates for one lesson.
#[must_use]
pub fn generate_lesson_content(
    subject: &str,
    topic: &str,
    grade_level: u8,
    duration_minutes: u32,
) -> LessonContent {
    let timing = allocate_time(duration_minutes);

    let introduction = format!(
        "({} minutes) Review prior knowledge related to {topic}. Pose a question that links \
         {topic} to the learners' everyday experience, then share the lesson objectives.",
        timing.introduction_minutes
    );
    let lesson_development = format!(
        "({} minutes) Introduce the key concepts of {topic} step by step using examples suited \
         to Grade {grade_level} learners. Demonstrate with the prepared materials, check \
         understanding with guided questions, and work through examples together on the board.",
        timing.development_minutes
    );
    let activities = vec![
        format!(
            "Pair work ({} minutes): Learners discuss and solve two short tasks on {topic}, then \
             compare answers with another pair.",
            timing.pair_work_minutes
        ),
        format!(
            "Group work ({} minutes): Groups of four to five learners complete a collaborative \
             task applying {topic} and present their findings to the class.",
            timing.group_work_minutes
        ),
        format!(
            "Individual work ({} minutes): Each learner completes practice questions on {topic} \
             in their exercise book.",
            timing.individual_work_minutes
        ),
    ];
    let assessment = format!(
        "Observe participation during activities, ask oral questions throughout, and review \
         individual work to check understanding of {topic}."
    );
    let conclusion = format!(
        "({} minutes) Summarize the key points of {topic} in {subject}, address any \
         misconceptions that came up, and preview the next lesson.",
        timing.conclusion_minutes
    );
    let homework = match next_topic(subject, topic) {
        Some(next) => format!(
            "Complete the practice exercise on {topic} and read ahead on {next} for the next lesson."
        ),
        None => format!(
            "Complete the practice exercise on {topic} and write a short paragraph on how it \
             applies to everyday life."
        ),
    };

    LessonContent {
        introduction,
        lesson_development,
        activities,
        assessment,
        conclusion,
        homework,
        timing,
    }
}

/// Build a complete lesson plan from templates.
#[must_use]
pub fn generate_lesson_plan(request: &LessonPlanRequest) -> LessonPlan {
    let subject = request.subject.trim();
    let topic = request.topic.trim();
    let content =
        generate_lesson_content(subject, topic, request.grade_level, request.duration_minutes);

    let supplied: Vec<String> = request
        .objectives
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(ToString::to_string)
        .collect();
    let objectives = if supplied.is_empty() {
        generate_objectives(subject, topic, request.grade_level)
    } else {
        supplied
    };

    let introduction = match request.context.as_deref().map(str::trim) {
        Some(context) if !context.is_empty() => {
            format!("{} Lesson context: {context}", content.introduction)
        }
        _ => content.introduction,
    };

    LessonPlan {
        title: format!("{subject}: {topic} (Grade {})", request.grade_level),
        subject: subject.to_string(),
        topic: topic.to_string(),
        grade_level: request.grade_level,
        duration_minutes: request.duration_minutes,
        objectives,
        materials: generate_materials(subject, topic, request.grade_level),
        introduction,
        lesson_development: content.lesson_development,
        activities: content.activities,
        assessment: content.assessment,
        conclusion: content.conclusion,
        homework: content.homework,
        timing: content.timing,
        generated_at: Utc::now(),
        provenance: Provenance::LocalTemplate,
    }
}
