//! Local assessment generation.
//!
//! Questions are emitted in block order (multiple choice, short answer,
//! essay, problem solving) and numbered `1..=n` across blocks. Marks and Bloom
//! level come from the fixed tables in [`crate::templates`], so
//! `total_marks` is always the sum of question marks.

use chrono::Utc;
use lec_core::entities::{Assessment, MarkingSchemeEntry, Question};
use lec_core::enums::{Difficulty, Provenance, QuestionType};
use lec_core::requests::AssessmentRequest;

use crate::templates::{cognitive_level_for, marks_for, minutes_for};

/// Split `total` questions across types.
///
/// With no types requested the split is 50% multiple choice and 30% short
/// answer (both rounded up) and 20% essay (rounded down), which can overshoot
/// `total` by one. With types requested, `total` is divided evenly and the
/// remainder goes one apiece to the first types in the order given.
#[must_use]
pub fn distribute_question_types(types: &[QuestionType], total: u32) -> Vec<(QuestionType, u32)> {
    if types.is_empty() {
        return vec![
            (QuestionType::MultipleChoice, (total * 5).div_ceil(10)),
            (QuestionType::ShortAnswer, (total * 3).div_ceil(10)),
            (QuestionType::Essay, total * 2 / 10),
        ];
    }

    let len = u32::try_from(types.len()).unwrap_or(u32::MAX);
    let base = total / len;
    let remainder = total % len;
    types
        .iter()
        .zip(0u32..)
        .map(|(ty, position)| (*ty, base + u32::from(position < remainder)))
        .collect()
}

/// One multiple choice question. The correct option rotates through the four
/// positions by question number.
#[must_use]
pub fn generate_mcq(
    subject: &str,
    topic: &str,
    difficulty: Difficulty,
    number: u32,
    variant: usize,
) -> Question {
    let (text, mut options, explanation) = match variant % 4 {
        0 => (
            format!("Which of the following best describes {topic} in {subject}?"),
            vec![
                format!("A key idea in {subject} that explains how {topic} works"),
                format!("An idea unrelated to {subject}"),
                format!("A common misconception about {topic}"),
                "None of the above".to_string(),
            ],
            format!("The correct option states the central idea of {topic}; the others are distractors."),
        ),
        1 => (
            format!("Which example correctly shows {topic} in everyday life?"),
            vec![
                format!("A situation where {topic} is used to solve a real problem"),
                "A situation with no connection to the topic".to_string(),
                format!("A situation that contradicts the rules of {topic}"),
                "All of the above".to_string(),
            ],
            format!("Only one option applies {topic} correctly to a real situation."),
        ),
        2 => (
            format!("What is the first step when solving a problem on {topic}?"),
            vec![
                "Identify what is given and what is required".to_string(),
                "Write down the final answer".to_string(),
                "Skip to the conclusion".to_string(),
                "Copy a neighbour's method".to_string(),
            ],
            "Problem solving starts by identifying the given information and the goal.".to_string(),
        ),
        _ => (
            format!("Why is {topic} important in {subject}?"),
            vec![
                format!("It builds understanding needed for later topics in {subject}"),
                "It is only useful for examinations".to_string(),
                "It has no practical use".to_string(),
                "It replaces all other topics".to_string(),
            ],
            format!("{topic} is foundational for later work in {subject}."),
        ),
    };

    let correct_answer = options[0].clone();
    let position = usize::try_from(number.saturating_sub(1)).unwrap_or(0) % options.len();
    options.rotate_right(position);

    Question {
        number,
        question_type: QuestionType::MultipleChoice,
        text,
        marks: marks_for(QuestionType::MultipleChoice, difficulty),
        options: Some(options),
        correct_answer,
        explanation,
        cognitive_level: cognitive_level_for(QuestionType::MultipleChoice, difficulty),
    }
}

#[must_use]
pub fn generate_short_answer(
    subject: &str,
    topic: &str,
    difficulty: Difficulty,
    number: u32,
    variant: usize,
) -> Question {
    let marks = marks_for(QuestionType::ShortAnswer, difficulty);
    let (text, correct_answer) = match variant % 3 {
        0 => (
            format!("Define {topic} and give one example."),
            format!("A clear definition of {topic} with one relevant example."),
        ),
        1 => (
            format!("Explain two ways in which {topic} is applied in {subject}."),
            format!("Two distinct, correctly explained applications of {topic}."),
        ),
        _ => (
            format!("State three key facts about {topic}."),
            format!("Any three accurate facts about {topic}."),
        ),
    };

    Question {
        number,
        question_type: QuestionType::ShortAnswer,
        text,
        marks,
        options: None,
        correct_answer,
        explanation: format!(
            "Award marks for each correct point, up to {marks}. Accept equivalent wording."
        ),
        cognitive_level: cognitive_level_for(QuestionType::ShortAnswer, difficulty),
    }
}

#[must_use]
pub fn generate_essay(
    subject: &str,
    topic: &str,
    difficulty: Difficulty,
    number: u32,
    variant: usize,
) -> Question {
    let text = match variant % 3 {
        0 => format!("Discuss the importance of {topic} in {subject}, using relevant examples."),
        1 => format!("Evaluate the impact of {topic} on everyday life in your community."),
        _ => format!("Compare and contrast two different aspects of {topic}."),
    };

    Question {
        number,
        question_type: QuestionType::Essay,
        text,
        marks: marks_for(QuestionType::Essay, difficulty),
        options: None,
        correct_answer: format!(
            "Open response: a well-organized essay showing understanding of {topic}."
        ),
        explanation: "Mark for introduction, development of points with examples, and a \
                      reasoned conclusion."
            .to_string(),
        cognitive_level: cognitive_level_for(QuestionType::Essay, difficulty),
    }
}

#[must_use]
pub fn generate_problem_solving(
    subject: &str,
    topic: &str,
    difficulty: Difficulty,
    number: u32,
    variant: usize,
) -> Question {
    let text = match variant % 2 {
        0 => format!(
            "A learner faces a real-life task involving {topic}. Describe the steps they should \
             follow to solve it and state the expected result."
        ),
        _ => format!(
            "Use your knowledge of {topic} in {subject} to solve a practical problem of your \
             choice. Show all your working."
        ),
    };

    Question {
        number,
        question_type: QuestionType::ProblemSolving,
        text,
        marks: marks_for(QuestionType::ProblemSolving, difficulty),
        options: None,
        correct_answer: format!("A correct method applying {topic}, with working and a final answer."),
        explanation: "Award method marks for each correct step and an accuracy mark for the \
                      final answer."
            .to_string(),
        cognitive_level: cognitive_level_for(QuestionType::ProblemSolving, difficulty),
    }
}

/// Generate every question for `request`, numbered across type blocks.
#[must_use]
pub fn generate_questions(request: &AssessmentRequest) -> Vec<Question> {
    let subject = request.subject.trim();
    let topic = request.topic.trim();
    let mut counts = distribute_question_types(&request.question_types, request.question_count);
    counts.sort_by_key(|(ty, _)| *ty);

    let mut questions = Vec::new();
    let mut number = 1u32;
    for (ty, count) in counts {
        let generate = match ty {
            QuestionType::MultipleChoice => generate_mcq,
            QuestionType::ShortAnswer => generate_short_answer,
            QuestionType::Essay => generate_essay,
            QuestionType::ProblemSolving => generate_problem_solving,
        };
        for variant in 0..usize::try_from(count).unwrap_or(0) {
            questions.push(generate(subject, topic, request.difficulty, number, variant));
            number += 1;
        }
    }
    questions
}

/// Suggested duration for a set of questions.
#[must_use]
pub fn default_duration(questions: &[Question]) -> u32 {
    questions
        .iter()
        .map(|q| minutes_for(q.question_type))
        .sum()
}

/// One marking-scheme entry per question.
#[must_use]
pub fn marking_scheme(questions: &[Question]) -> Vec<MarkingSchemeEntry> {
    questions
        .iter()
        .map(|q| MarkingSchemeEntry {
            question_number: q.number,
            marks: q.marks,
            guidance: match q.question_type {
                QuestionType::MultipleChoice => {
                    format!("Award {} for: {}", plural_marks(q.marks), q.correct_answer)
                }
                _ => format!("{} Expected: {}", q.explanation, q.correct_answer),
            },
        })
        .collect()
}

/// Candidate-facing instructions.
#[must_use]
pub fn instructions(questions: &[Question], total_marks: u32, duration_minutes: u32) -> Vec<String> {
    let mut lines = vec![
        "Answer all questions in the spaces provided.".to_string(),
        format!(
            "This assessment has {} questions worth a total of {total_marks} marks.",
            questions.len()
        ),
        format!("Time allowed: {duration_minutes} minutes."),
    ];
    if questions
        .iter()
        .any(|q| q.question_type == QuestionType::MultipleChoice)
    {
        lines.push("For multiple choice questions, choose the single best answer.".to_string());
    }
    if questions.iter().any(|q| {
        matches!(
            q.question_type,
            QuestionType::ShortAnswer | QuestionType::ProblemSolving
        )
    }) {
        lines.push("Show all working where required.".to_string());
    }
    lines
}

/// Build a complete assessment from templates.
#[must_use]
pub fn generate_assessment(request: &AssessmentRequest) -> Assessment {
    let questions = generate_questions(request);
    let total_marks = questions.iter().map(|q| q.marks).sum();
    let duration_minutes = request
        .duration_minutes
        .unwrap_or_else(|| default_duration(&questions));
    let subject = request.subject.trim();
    let topic = request.topic.trim();

    Assessment {
        title: format!("{subject} Assessment: {topic}"),
        subject: subject.to_string(),
        topic: topic.to_string(),
        grade_level: request.grade_level,
        difficulty: request.difficulty,
        total_marks,
        duration_minutes,
        instructions: instructions(&questions, total_marks, duration_minutes),
        marking_scheme: marking_scheme(&questions),
        questions,
        generated_at: Utc::now(),
        provenance: Provenance::LocalTemplate,
    }
}

fn plural_marks(marks: u32) -> String {
    if marks == 1 {
        "1 mark".to_string()
    } else {
        format!("{marks} marks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lec_core::enums::CognitiveLevel;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn request(types: Vec<QuestionType>, count: u32) -> AssessmentRequest {
        AssessmentRequest {
            subject: "Science".into(),
            topic: "Photosynthesis".into(),
            grade_level: 7,
            question_count: count,
            question_types: types,
            difficulty: Difficulty::Medium,
            duration_minutes: None,
        }
    }

    #[test]
    fn remainder_goes_to_first_listed_type() {
        assert_eq!(
            distribute_question_types(&[QuestionType::MultipleChoice, QuestionType::Essay], 5),
            vec![(QuestionType::MultipleChoice, 3), (QuestionType::Essay, 2)]
        );
    }

    #[test]
    fn distribution_follows_input_order() {
        assert_eq!(
            distribute_question_types(
                &[QuestionType::Essay, QuestionType::ShortAnswer, QuestionType::MultipleChoice],
                7
            ),
            vec![
                (QuestionType::Essay, 3),
                (QuestionType::ShortAnswer, 2),
                (QuestionType::MultipleChoice, 2),
            ]
        );
    }

    #[rstest]
    #[case(10, [5, 3, 2])]
    #[case(5, [3, 2, 1])]
    #[case(3, [2, 1, 0])]
    #[case(1, [1, 1, 0])]
    fn default_split(#[case] total: u32, #[case] expected: [u32; 3]) {
        let split = distribute_question_types(&[], total);
        assert_eq!(
            split,
            vec![
                (QuestionType::MultipleChoice, expected[0]),
                (QuestionType::ShortAnswer, expected[1]),
                (QuestionType::Essay, expected[2]),
            ]
        );
    }

    #[test]
    fn default_split_is_within_one_of_total() {
        for total in 1..=100 {
            let sum: u32 = distribute_question_types(&[], total)
                .iter()
                .map(|(_, n)| n)
                .sum();
            assert!(sum == total || sum == total + 1, "total {total} gave {sum}");
        }
    }

    #[test]
    fn mcq_has_four_options_containing_answer() {
        for number in 1..=8 {
            let q = generate_mcq("Mathematics", "Fractions", Difficulty::Easy, number, number as usize);
            let options = q.options.as_ref().unwrap();
            assert_eq!(options.len(), 4);
            assert!(options.contains(&q.correct_answer));
            let position = options.iter().position(|o| *o == q.correct_answer).unwrap();
            assert_eq!(position, (number as usize - 1) % 4);
            assert_eq!(q.marks, 1);
            assert_eq!(q.cognitive_level, CognitiveLevel::Remember);
        }
    }

    #[test]
    fn non_mcq_questions_have_no_options() {
        let short = generate_short_answer("English", "Poetry", Difficulty::Hard, 1, 0);
        let essay = generate_essay("English", "Poetry", Difficulty::Hard, 2, 0);
        let problem = generate_problem_solving("English", "Poetry", Difficulty::Hard, 3, 0);
        assert!(short.options.is_none() && essay.options.is_none() && problem.options.is_none());
        assert_eq!((short.marks, essay.marks, problem.marks), (7, 15, 12));
    }

    #[test]
    fn questions_are_numbered_in_block_order() {
        let questions = generate_questions(&request(
            vec![QuestionType::Essay, QuestionType::MultipleChoice],
            5,
        ));
        let types: Vec<QuestionType> = questions.iter().map(|q| q.question_type).collect();
        assert_eq!(
            types,
            vec![
                QuestionType::MultipleChoice,
                QuestionType::MultipleChoice,
                QuestionType::Essay,
                QuestionType::Essay,
                QuestionType::Essay,
            ]
        );
        let numbers: Vec<u32> = questions.iter().map(|q| q.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn assessment_marks_are_conserved() {
        let assessment = generate_assessment(&request(
            vec![
                QuestionType::MultipleChoice,
                QuestionType::ShortAnswer,
                QuestionType::ProblemSolving,
            ],
            7,
        ));
        assert_eq!(assessment.questions.len(), 7);
        assert_eq!(assessment.total_marks, assessment.marks_sum());
        // 3 MCQ x 2 + 2 short x 5 + 2 problem x 8
        assert_eq!(assessment.total_marks, 32);
        assert!(assessment.numbering_is_contiguous());
        assert_eq!(assessment.marking_scheme.len(), 7);
    }

    #[test]
    fn default_duration_sums_per_type_minutes() {
        let assessment = generate_assessment(&request(vec![QuestionType::MultipleChoice, QuestionType::Essay], 4));
        // 2 MCQ x 2 min + 2 essays x 15 min
        assert_eq!(assessment.duration_minutes, 34);
    }

    #[test]
    fn requested_duration_is_kept() {
        let assessment = generate_assessment(&AssessmentRequest {
            duration_minutes: Some(45),
            ..request(Vec::new(), 10)
        });
        assert_eq!(assessment.duration_minutes, 45);
        assert!(assessment.instructions.iter().any(|l| l.contains("45 minutes")));
    }

    #[test]
    fn assessment_is_local() {
        let assessment = generate_assessment(&request(Vec::new(), 10));
        assert_eq!(assessment.provenance, Provenance::LocalTemplate);
        assert!(!assessment.provenance.is_ai_generated());
        assert_eq!(assessment.title, "Science Assessment: Photosynthesis");
    }
}
