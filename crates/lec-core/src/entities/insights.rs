use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AttendanceStatus, InterventionKind, PerformanceStatus, Provenance, TrendDirection};

/// Message carried by the attendance no-data object.
pub const NO_ATTENDANCE_DATA: &str = "No attendance data available";

/// Message carried by the performance no-data object.
pub const NO_GRADE_DATA: &str = "No grade data available";

// ---------------------------------------------------------------------------
// Input records
// ---------------------------------------------------------------------------

/// One attendance mark for one student on one day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// One graded piece of work, already normalized to a percentage.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GradeRecord {
    pub student_id: String,
    pub subject: String,
    #[serde(default)]
    pub assessment: Option<String>,
    pub percentage: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub class_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Educational insights for a class or cohort.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Insights {
    pub summary: InsightsSummary,
    pub attendance_insights: AttendanceInsights,
    pub performance_insights: PerformanceInsights,
    pub recommendations: Vec<String>,
    pub trends: Trends,
    pub interventions: Vec<Intervention>,
    pub generated_at: DateTime<Utc>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InsightsSummary {
    pub total_students: u32,
    pub attendance_rate_percent: f64,
    pub average_performance_percent: f64,
    pub status: PerformanceStatus,
}

/// Attendance analysis, or the literal no-data message object when there are
/// no records to analyze.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum AttendanceInsights {
    NoData { message: String },
    Available(AttendanceBreakdown),
}

impl AttendanceInsights {
    #[must_use]
    pub fn no_data() -> Self {
        Self::NoData {
            message: NO_ATTENDANCE_DATA.to_string(),
        }
    }

    #[must_use]
    pub const fn breakdown(&self) -> Option<&AttendanceBreakdown> {
        match self {
            Self::Available(breakdown) => Some(breakdown),
            Self::NoData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AttendanceBreakdown {
    pub total_records: u32,
    pub present_count: u32,
    pub absent_count: u32,
    pub late_count: u32,
    pub excused_count: u32,
    pub attendance_rate_percent: f64,
    /// Names of students whose own attendance rate is below the chronic threshold.
    pub chronic_absentees: Vec<String>,
    pub patterns: Vec<String>,
}

/// Performance analysis, or the literal no-data message object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum PerformanceInsights {
    NoData { message: String },
    Available(PerformanceBreakdown),
}

impl PerformanceInsights {
    #[must_use]
    pub fn no_data() -> Self {
        Self::NoData {
            message: NO_GRADE_DATA.to_string(),
        }
    }

    #[must_use]
    pub const fn breakdown(&self) -> Option<&PerformanceBreakdown> {
        match self {
            Self::Available(breakdown) => Some(breakdown),
            Self::NoData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PerformanceBreakdown {
    pub total_grades: u32,
    pub average_percent: f64,
    pub highest_percent: f64,
    pub lowest_percent: f64,
    pub bands: GradeBands,
    pub struggling_students: Vec<String>,
    pub top_performers: Vec<String>,
}

/// Count of grade records falling in each percentage band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub struct GradeBands {
    /// 80 and above.
    pub excellent: u32,
    /// 70 to below 80.
    pub good: u32,
    /// 50 to below 70.
    pub average: u32,
    /// Below 50.
    pub below_average: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Trends {
    pub attendance: TrendDirection,
    pub performance: TrendDirection,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Intervention {
    #[serde(rename = "type")]
    pub kind: InterventionKind,
    pub target: String,
    pub action: String,
}
