//! Defaults applied by `lectern` when a flag is omitted.

use serde::{Deserialize, Serialize};

const fn default_grade_level() -> u8 {
    7
}

const fn default_duration_minutes() -> u32 {
    40
}

const fn default_question_count() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Grade level used when `--grade` is omitted.
    #[serde(default = "default_grade_level")]
    pub default_grade_level: u8,

    /// Lesson length used when `--duration` is omitted.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,

    /// Question count used when `--count` is omitted.
    #[serde(default = "default_question_count")]
    pub default_question_count: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_grade_level: default_grade_level(),
            default_duration_minutes: default_duration_minutes(),
            default_question_count: default_question_count(),
        }
    }
}
