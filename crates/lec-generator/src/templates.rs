//! Static template tables: subject topics, Bloom's-taxonomy verbs, per-subject
//! materials, and the per-type marks and cognitive-level tables.
//!
//! Subject lookups are case-insensitive and accept a few common aliases
//! (`maths`, `biology`, `ict`, ...). Unknown subjects resolve to `None`.

use lec_core::enums::{CognitiveLevel, Difficulty, QuestionType};

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// Map a free-form subject name to its canonical table key.
#[must_use]
pub fn canonical_subject(subject: &str) -> Option<&'static str> {
    let normalized = subject.trim().to_ascii_lowercase();
    let key = match normalized.as_str() {
        "mathematics" | "maths" | "math" => "mathematics",
        "science" | "integrated science" | "biology" | "chemistry" | "physics"
        | "science and technology" => "science",
        "english" | "english language" | "literature" => "english",
        "kiswahili" | "swahili" => "kiswahili",
        "social studies" | "history" | "geography" | "history and government" => {
            "social studies"
        }
        "computer studies" | "computer science" | "ict" | "coding" => "computer studies",
        "art" | "art and craft" | "creative arts" => "creative arts",
        "music" => "music",
        "physical education" | "pe" | "p.e." => "physical education",
        "agriculture" => "agriculture",
        "religious education" | "cre" | "ire" => "religious education",
        _ => return None,
    };
    Some(key)
}

const SUBJECT_TOPICS: &[(&str, &[&str])] = &[
    (
        "mathematics",
        &[
            "Whole Numbers",
            "Fractions",
            "Decimals",
            "Percentages",
            "Algebra",
            "Geometry",
            "Measurement",
            "Statistics",
            "Probability",
        ],
    ),
    (
        "science",
        &[
            "Living Things",
            "Plants",
            "Photosynthesis",
            "The Human Body",
            "Matter",
            "Energy",
            "Forces",
            "The Environment",
        ],
    ),
    (
        "english",
        &[
            "Grammar",
            "Vocabulary",
            "Reading Comprehension",
            "Composition Writing",
            "Poetry",
            "Oral Skills",
        ],
    ),
    (
        "kiswahili",
        &["Sarufi", "Msamiati", "Ufahamu", "Insha", "Fasihi"],
    ),
    (
        "social studies",
        &[
            "Our Community",
            "Maps and Directions",
            "Government",
            "Early Civilizations",
            "Trade",
            "Natural Resources",
        ],
    ),
    (
        "computer studies",
        &[
            "Computer Hardware",
            "Software",
            "Internet Safety",
            "Coding Basics",
            "Data Handling",
        ],
    ),
    (
        "creative arts",
        &["Drawing", "Painting", "Modelling", "Weaving", "Pattern Making"],
    ),
    (
        "music",
        &["Rhythm", "Melody", "Folk Songs", "Musical Instruments"],
    ),
    (
        "physical education",
        &["Athletics", "Ball Games", "Gymnastics", "Swimming", "Health and Fitness"],
    ),
    (
        "agriculture",
        &["Soil", "Crop Production", "Livestock", "Farm Tools", "Conservation"],
    ),
    (
        "religious education",
        &["Creation", "Values", "Festivals", "Community Service"],
    ),
];

/// Topics listed for a subject, in teaching order. Empty for unknown subjects.
#[must_use]
pub fn topics_for(subject: &str) -> &'static [&'static str] {
    canonical_subject(subject)
        .and_then(|key| SUBJECT_TOPICS.iter().find(|(k, _)| *k == key))
        .map(|(_, topics)| *topics)
        .unwrap_or_default()
}

/// The topic taught after `topic` in the subject's list, if both are known.
#[must_use]
pub fn next_topic(subject: &str, topic: &str) -> Option<&'static str> {
    let topics = topics_for(subject);
    let position = topics
        .iter()
        .position(|t| t.eq_ignore_ascii_case(topic.trim()))?;
    topics.get(position + 1).copied()
}

// ---------------------------------------------------------------------------
// Bloom's taxonomy
// ---------------------------------------------------------------------------

/// Action verbs for each cognitive level.
#[must_use]
pub const fn bloom_verbs(level: CognitiveLevel) -> &'static [&'static str] {
    match level {
        CognitiveLevel::Remember => &["define", "list", "recall", "identify", "name", "state"],
        CognitiveLevel::Understand => &[
            "explain",
            "describe",
            "summarize",
            "interpret",
            "classify",
            "discuss",
        ],
        CognitiveLevel::Apply => &[
            "apply",
            "demonstrate",
            "solve",
            "use",
            "illustrate",
            "calculate",
        ],
        CognitiveLevel::Analyze => &[
            "analyze",
            "compare",
            "examine",
            "differentiate",
            "organize",
            "investigate",
        ],
        CognitiveLevel::Evaluate => &["evaluate", "justify", "assess", "critique", "judge", "defend"],
        CognitiveLevel::Create => &["design", "construct", "develop", "formulate", "compose", "plan"],
    }
}

/// Pick a verb for `level`, keyed by grade so the choice depends only on input.
#[must_use]
pub fn verb_for_grade(level: CognitiveLevel, grade_level: u8) -> &'static str {
    let verbs = bloom_verbs(level);
    verbs[usize::from(grade_level) % verbs.len()]
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

const SUBJECT_MATERIALS: &[(&str, &[&str])] = &[
    (
        "mathematics",
        &["Geometry sets", "Graph paper", "Calculators", "Number charts"],
    ),
    (
        "science",
        &[
            "Laboratory apparatus",
            "Safety goggles",
            "Specimen samples",
            "Measuring instruments",
        ],
    ),
    ("english", &["Dictionaries", "Reading passages", "Story books"]),
    ("kiswahili", &["Kamusi", "Vitabu vya hadithi", "Kadi za maneno"]),
    (
        "social studies",
        &["Maps and atlases", "Globe", "Photographs and local artefacts"],
    ),
    (
        "computer studies",
        &["Computers or tablets", "Projector", "Internet access"],
    ),
    (
        "creative arts",
        &["Drawing paper", "Paints and brushes", "Modelling clay"],
    ),
    ("music", &["Musical instruments", "Audio player", "Song sheets"]),
    ("physical education", &["Balls and cones", "Whistle", "Stopwatch"]),
    ("agriculture", &["Garden tools", "Seeds", "Soil samples"]),
    ("religious education", &["Scripture texts", "Story cards"]),
];

/// Subject-specific materials appended to the base list. Empty for unknown
/// subjects.
#[must_use]
pub fn subject_materials(subject: &str) -> &'static [&'static str] {
    canonical_subject(subject)
        .and_then(|key| SUBJECT_MATERIALS.iter().find(|(k, _)| *k == key))
        .map(|(_, materials)| *materials)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Question tables
// ---------------------------------------------------------------------------

/// Marks awarded for one question of `ty` at `difficulty`.
#[must_use]
pub const fn marks_for(ty: QuestionType, difficulty: Difficulty) -> u32 {
    let table: [u32; 3] = match ty {
        QuestionType::MultipleChoice => [1, 2, 3],
        QuestionType::ShortAnswer => [3, 5, 7],
        QuestionType::Essay => [8, 12, 15],
        QuestionType::ProblemSolving => [5, 8, 12],
    };
    table[difficulty_index(difficulty)]
}

/// Bloom level targeted by one question of `ty` at `difficulty`.
#[must_use]
pub const fn cognitive_level_for(ty: QuestionType, difficulty: Difficulty) -> CognitiveLevel {
    use CognitiveLevel::{Analyze, Apply, Create, Evaluate, Remember, Understand};
    let table: [CognitiveLevel; 3] = match ty {
        QuestionType::MultipleChoice => [Remember, Understand, Apply],
        QuestionType::ShortAnswer => [Understand, Apply, Analyze],
        QuestionType::Essay => [Analyze, Evaluate, Create],
        QuestionType::ProblemSolving => [Apply, Analyze, Evaluate],
    };
    table[difficulty_index(difficulty)]
}

/// Suggested minutes per question, used when no duration is requested.
#[must_use]
pub const fn minutes_for(ty: QuestionType) -> u32 {
    match ty {
        QuestionType::MultipleChoice => 2,
        QuestionType::ShortAnswer => 5,
        QuestionType::Essay => 15,
        QuestionType::ProblemSolving => 10,
    }
}

const fn difficulty_index(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    }
}
