//! Serde roundtrip and JsonSchema validation tests for content entities.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use lec_core::entities::*;
use lec_core::enums::*;
use lec_core::requests::*;
use lec_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
}

fn sample_lesson() -> LessonPlan {
    LessonPlan {
        title: "Mathematics: Fractions".into(),
        subject: "Mathematics".into(),
        topic: "Fractions".into(),
        grade_level: 5,
        duration_minutes: 40,
        objectives: vec!["Explain what a fraction represents".into()],
        materials: vec!["Fraction strips".into()],
        introduction: "Share a pizza".into(),
        lesson_development: "Model halves and quarters".into(),
        activities: vec!["Pair work: fold paper strips".into()],
        assessment: "Exit ticket".into(),
        conclusion: "Recap equivalent fractions".into(),
        homework: "Workbook page 12".into(),
        timing: LessonTiming {
            introduction_minutes: 6,
            development_minutes: 20,
            activities_minutes: 10,
            pair_work_minutes: 4,
            group_work_minutes: 4,
            individual_work_minutes: 3,
            conclusion_minutes: 4,
        },
        generated_at: Utc::now(),
        provenance: Provenance::LocalTemplate,
    }
}

roundtrip_and_validate!(lesson_plan_roundtrip, LessonPlan, sample_lesson());

roundtrip_and_validate!(
    assessment_roundtrip,
    Assessment,
    Assessment {
        title: "Science Assessment: Photosynthesis".into(),
        subject: "Science".into(),
        topic: "Photosynthesis".into(),
        grade_level: 7,
        difficulty: Difficulty::Medium,
        total_marks: 7,
        duration_minutes: 7,
        instructions: vec!["Answer all questions.".into()],
        questions: vec![
            Question {
                number: 1,
                question_type: QuestionType::MultipleChoice,
                text: "Which gas do plants absorb?".into(),
                marks: 2,
                options: Some(vec![
                    "Carbon dioxide".into(),
                    "Oxygen".into(),
                    "Nitrogen".into(),
                    "Helium".into(),
                ]),
                correct_answer: "Carbon dioxide".into(),
                explanation: "Plants fix CO2 during photosynthesis.".into(),
                cognitive_level: CognitiveLevel::Understand,
            },
            Question {
                number: 2,
                question_type: QuestionType::ShortAnswer,
                text: "Name the pigment that captures light.".into(),
                marks: 5,
                options: None,
                correct_answer: "Chlorophyll".into(),
                explanation: "Chlorophyll absorbs red and blue light.".into(),
                cognitive_level: CognitiveLevel::Apply,
            },
        ],
        marking_scheme: vec![MarkingSchemeEntry {
            question_number: 1,
            marks: 2,
            guidance: "Award full marks for the correct option.".into(),
        }],
        generated_at: Utc::now(),
        provenance: Provenance::RemoteAi,
    }
);

roundtrip_and_validate!(
    insights_available_roundtrip,
    Insights,
    Insights {
        summary: InsightsSummary {
            total_students: 2,
            attendance_rate_percent: 75.0,
            average_performance_percent: 68.5,
            status: PerformanceStatus::NeedsAttention,
        },
        attendance_insights: AttendanceInsights::Available(AttendanceBreakdown {
            total_records: 4,
            present_count: 3,
            absent_count: 1,
            late_count: 0,
            excused_count: 0,
            attendance_rate_percent: 75.0,
            chronic_absentees: vec!["Brian Otieno".into()],
            patterns: vec!["Absences cluster on Mondays".into()],
        }),
        performance_insights: PerformanceInsights::Available(PerformanceBreakdown {
            total_grades: 2,
            average_percent: 68.5,
            highest_percent: 82.0,
            lowest_percent: 55.0,
            bands: GradeBands {
                excellent: 1,
                good: 0,
                average: 1,
                below_average: 0,
            },
            struggling_students: Vec::new(),
            top_performers: vec!["Amina Wanjiru".into()],
        }),
        recommendations: vec!["Follow up on Monday absences".into()],
        trends: Trends {
            attendance: TrendDirection::Stable,
            performance: TrendDirection::InsufficientData,
            notes: Vec::new(),
        },
        interventions: vec![Intervention {
            kind: InterventionKind::Attendance,
            target: "Brian Otieno".into(),
            action: "Contact guardian".into(),
        }],
        generated_at: Utc::now(),
        provenance: Provenance::LocalTemplate,
    }
);

roundtrip_and_validate!(
    insights_no_data_roundtrip,
    Insights,
    Insights {
        summary: InsightsSummary {
            total_students: 0,
            attendance_rate_percent: 0.0,
            average_performance_percent: 0.0,
            status: PerformanceStatus::NeedsAttention,
        },
        attendance_insights: AttendanceInsights::no_data(),
        performance_insights: PerformanceInsights::no_data(),
        recommendations: vec!["Record attendance and grades to unlock insights".into()],
        trends: Trends {
            attendance: TrendDirection::InsufficientData,
            performance: TrendDirection::InsufficientData,
            notes: Vec::new(),
        },
        interventions: Vec::new(),
        generated_at: Utc::now(),
        provenance: Provenance::LocalTemplate,
    }
);

roundtrip_and_validate!(
    insights_request_roundtrip,
    InsightsRequest,
    InsightsRequest {
        attendance_records: vec![AttendanceRecord {
            student_id: "stu-1".into(),
            date: day(2),
            status: AttendanceStatus::Late,
        }],
        grade_records: vec![GradeRecord {
            student_id: "stu-1".into(),
            subject: "English".into(),
            assessment: Some("Composition".into()),
            percentage: 71.5,
            date: day(3),
        }],
        student_records: vec![StudentRecord {
            id: "stu-1".into(),
            name: "Amina Wanjiru".into(),
            class_id: Some("7B".into()),
        }],
        class_id: Some("7B".into()),
        subject: None,
    }
);

roundtrip_and_validate!(
    generation_report_roundtrip,
    GenerationReport<LessonPlan>,
    GenerationReport {
        content: sample_lesson(),
        route: vec![
            GenerationState::Idle,
            GenerationState::AttemptingRemote,
            GenerationState::FallingBackLocal,
            GenerationState::Done,
        ],
        fallback_reason: Some("API error (503): upstream unavailable".into()),
    }
);

#[test]
fn lesson_plan_list_invariant_helper() {
    let mut plan = sample_lesson();
    assert!(plan.lists_are_populated());
    plan.materials.clear();
    assert!(!plan.lists_are_populated());
}

#[test]
fn question_type_serializes_under_type_key() {
    let question = Question {
        number: 1,
        question_type: QuestionType::Essay,
        text: "Discuss.".into(),
        marks: 12,
        options: None,
        correct_answer: "Open response".into(),
        explanation: "Marked against the rubric.".into(),
        cognitive_level: CognitiveLevel::Evaluate,
    };
    let json = serde_json::to_value(&question).unwrap();
    assert_eq!(json["type"], "essay");
    assert!(json.get("options").is_none());
}

#[test]
fn report_detects_fallback_route() {
    let report = GenerationReport {
        content: (),
        route: vec![
            GenerationState::Idle,
            GenerationState::FallingBackLocal,
            GenerationState::Done,
        ],
        fallback_reason: None,
    };
    assert!(!report.fell_back());
}
