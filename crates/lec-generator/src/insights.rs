//! Local insights: direct aggregation and fixed threshold comparisons over
//! attendance and grade records.
//!
//! Percentages are rounded to one decimal place before they are compared or
//! reported, so the status in the summary always agrees with the numbers shown
//! beside it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use lec_core::entities::{
    AttendanceBreakdown, AttendanceInsights, AttendanceRecord, GradeBands, GradeRecord, Insights,
    InsightsSummary, Intervention, PerformanceBreakdown, PerformanceInsights, StudentRecord, Trends,
};
use lec_core::enums::{AttendanceStatus, InterventionKind, PerformanceStatus, Provenance, TrendDirection};
use lec_core::requests::InsightsRequest;
use tracing::debug;

pub const EXCELLENT_ATTENDANCE: f64 = 90.0;
pub const EXCELLENT_PERFORMANCE: f64 = 80.0;
pub const GOOD_ATTENDANCE: f64 = 80.0;
pub const GOOD_PERFORMANCE: f64 = 70.0;

/// A student whose own attendance rate is below this is chronically absent.
pub const CHRONIC_ABSENCE_BELOW: f64 = 75.0;
/// A student whose own average is below this is struggling.
pub const STRUGGLING_BELOW: f64 = 50.0;
/// A student whose own average is at or above this is a top performer.
pub const TOP_PERFORMER_FROM: f64 = 80.0;

/// Minimum records before a trend is reported.
pub const MIN_TREND_RECORDS: usize = 4;
/// Change between halves, in percentage points, that counts as a trend.
pub const TREND_THRESHOLD: f64 = 5.0;

/// Classify a class by attendance and performance. Both comparisons are
/// inclusive.
#[must_use]
pub fn classify(attendance_rate: f64, average_performance: f64) -> PerformanceStatus {
    if attendance_rate >= EXCELLENT_ATTENDANCE && average_performance >= EXCELLENT_PERFORMANCE {
        PerformanceStatus::Excellent
    } else if attendance_rate >= GOOD_ATTENDANCE && average_performance >= GOOD_PERFORMANCE {
        PerformanceStatus::Good
    } else {
        PerformanceStatus::NeedsAttention
    }
}

/// Share of records marked present, as a percentage. Zero for no records.
#[must_use]
pub fn attendance_rate<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> f64 {
    let (present, total) = records.into_iter().fold((0u32, 0u32), |(present, total), r| {
        (present + u32::from(r.status == AttendanceStatus::Present), total + 1)
    });
    percent(present, total)
}

/// Mean grade percentage. Zero for no records.
#[must_use]
pub fn average_performance<'a>(grades: impl IntoIterator<Item = &'a GradeRecord>) -> f64 {
    let (sum, count) = grades
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), g| (sum + g.percentage, count + 1));
    if count == 0 {
        0.0
    } else {
        round1(sum / f64::from(count))
    }
}

/// Attendance breakdown, or the no-data object for an empty slice.
#[must_use]
pub fn generate_attendance_insights(
    records: &[AttendanceRecord],
    students: &[StudentRecord],
) -> AttendanceInsights {
    if records.is_empty() {
        return AttendanceInsights::no_data();
    }

    let mut present_count = 0;
    let mut absent_count = 0;
    let mut late_count = 0;
    let mut excused_count = 0;
    let mut per_student: BTreeMap<&str, Vec<&AttendanceRecord>> = BTreeMap::new();
    for record in records {
        match record.status {
            AttendanceStatus::Present => present_count += 1,
            AttendanceStatus::Absent => absent_count += 1,
            AttendanceStatus::Late => late_count += 1,
            AttendanceStatus::Excused => excused_count += 1,
        }
        per_student
            .entry(record.student_id.as_str())
            .or_default()
            .push(record);
    }

    let total_records = count(records.len());
    let rate = percent(present_count, total_records);

    let chronic_absentees = per_student
        .iter()
        .filter(|(_, marks)| attendance_rate(marks.iter().copied()) < CHRONIC_ABSENCE_BELOW)
        .map(|(id, _)| student_name(id, students))
        .collect();

    let mut patterns = Vec::new();
    if let Some((day, absences)) = busiest_absence_day(records) {
        patterns.push(format!(
            "Most absences fall on {}s ({absences} of {absent_count})",
            weekday_name(day)
        ));
    }
    if late_count > 0 {
        patterns.push(format!(
            "{late_count} late arrivals recorded ({}% of records)",
            percent(late_count, total_records)
        ));
    }
    if rate >= EXCELLENT_ATTENDANCE {
        patterns.push("Attendance is consistently high".to_string());
    }

    AttendanceInsights::Available(AttendanceBreakdown {
        total_records,
        present_count,
        absent_count,
        late_count,
        excused_count,
        attendance_rate_percent: rate,
        chronic_absentees,
        patterns,
    })
}

/// Performance breakdown, or the no-data object for an empty slice.
#[must_use]
pub fn generate_performance_insights(
    grades: &[GradeRecord],
    students: &[StudentRecord],
) -> PerformanceInsights {
    if grades.is_empty() {
        return PerformanceInsights::no_data();
    }

    let mut bands = GradeBands::default();
    let mut highest = f64::MIN;
    let mut lowest = f64::MAX;
    let mut per_student: BTreeMap<&str, Vec<&GradeRecord>> = BTreeMap::new();
    for grade in grades {
        let p = grade.percentage;
        highest = highest.max(p);
        lowest = lowest.min(p);
        if p >= 80.0 {
            bands.excellent += 1;
        } else if p >= 70.0 {
            bands.good += 1;
        } else if p >= 50.0 {
            bands.average += 1;
        } else {
            bands.below_average += 1;
        }
        per_student
            .entry(grade.student_id.as_str())
            .or_default()
            .push(grade);
    }

    let averages: Vec<(&str, f64)> = per_student
        .iter()
        .map(|(id, marks)| (*id, average_performance(marks.iter().copied())))
        .collect();

    PerformanceInsights::Available(PerformanceBreakdown {
        total_grades: count(grades.len()),
        average_percent: average_performance(grades),
        highest_percent: round1(highest),
        lowest_percent: round1(lowest),
        bands,
        struggling_students: averages
            .iter()
            .filter(|(_, avg)| *avg < STRUGGLING_BELOW)
            .map(|(id, _)| student_name(id, students))
            .collect(),
        top_performers: averages
            .iter()
            .filter(|(_, avg)| *avg >= TOP_PERFORMER_FROM)
            .map(|(id, _)| student_name(id, students))
            .collect(),
    })
}

/// Compare the first and second chronological halves of the records.
#[must_use]
pub fn generate_trends(attendance: &[AttendanceRecord], grades: &[GradeRecord]) -> Trends {
    let mut notes = Vec::new();

    let attendance_trend = halves_by_date(attendance, |r| r.date).map_or(
        TrendDirection::InsufficientData,
        |(first, second)| {
            let (before, after) = (attendance_rate(first), attendance_rate(second));
            let trend = direction(before, after);
            notes.push(format!(
                "Attendance {trend}: {before}% in the first half, {after}% in the second"
            ));
            trend
        },
    );

    let performance_trend = halves_by_date(grades, |g| g.date).map_or(
        TrendDirection::InsufficientData,
        |(first, second)| {
            let (before, after) = (average_performance(first), average_performance(second));
            let trend = direction(before, after);
            notes.push(format!(
                "Performance {trend}: {before}% in the first half, {after}% in the second"
            ));
            trend
        },
    );

    Trends {
        attendance: attendance_trend,
        performance: performance_trend,
        notes,
    }
}

/// Full insights for a request, computed from the records alone.
#[must_use]
pub fn generate_insights(request: &InsightsRequest) -> Insights {
    let scoped = Scoped::from_request(request);

    let attendance_insights = generate_attendance_insights(&scoped.attendance, &scoped.students);
    let performance_insights = generate_performance_insights(&scoped.grades, &scoped.students);
    let trends = generate_trends(&scoped.attendance, &scoped.grades);

    let attendance_rate_percent = attendance_rate(&scoped.attendance);
    let average_performance_percent = average_performance(&scoped.grades);
    let summary = InsightsSummary {
        total_students: scoped.total_students(),
        attendance_rate_percent,
        average_performance_percent,
        status: classify(attendance_rate_percent, average_performance_percent),
    };

    debug!(
        students = summary.total_students,
        attendance_records = scoped.attendance.len(),
        grade_records = scoped.grades.len(),
        status = %summary.status,
        "computed local insights"
    );

    let recommendations =
        local_recommendations(&summary, &attendance_insights, &performance_insights, &trends);
    let interventions = local_interventions(&summary, &attendance_insights, &performance_insights);

    Insights {
        summary,
        attendance_insights,
        performance_insights,
        recommendations,
        trends,
        interventions,
        generated_at: Utc::now(),
        provenance: Provenance::LocalTemplate,
    }
}

/// Records left after the class and subject filters.
struct Scoped {
    attendance: Vec<AttendanceRecord>,
    grades: Vec<GradeRecord>,
    students: Vec<StudentRecord>,
}

impl Scoped {
    fn from_request(request: &InsightsRequest) -> Self {
        let class_id = request.class_id.as_deref().map(str::trim).filter(|c| !c.is_empty());
        let subject = request.subject.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let students: Vec<StudentRecord> = request
            .student_records
            .iter()
            .filter(|s| class_id.is_none_or(|class| s.class_id.as_deref() == Some(class)))
            .cloned()
            .collect();
        let in_scope: Option<BTreeSet<&str>> =
            class_id.map(|_| students.iter().map(|s| s.id.as_str()).collect());
        let keep = |id: &str| in_scope.as_ref().is_none_or(|ids| ids.contains(id));

        let attendance = request
            .attendance_records
            .iter()
            .filter(|r| keep(r.student_id.as_str()))
            .cloned()
            .collect();
        let grades = request
            .grade_records
            .iter()
            .filter(|g| keep(g.student_id.as_str()))
            .filter(|g| subject.is_none_or(|s| g.subject.trim().eq_ignore_ascii_case(s)))
            .cloned()
            .collect();

        Self {
            attendance,
            grades,
            students,
        }
    }

    /// Student roster size, or distinct ids in the records when no roster
    /// was given.
    fn total_students(&self) -> u32 {
        if !self.students.is_empty() {
            return count(self.students.len());
        }
        let ids: BTreeSet<&str> = self
            .attendance
            .iter()
            .map(|r| r.student_id.as_str())
            .chain(self.grades.iter().map(|g| g.student_id.as_str()))
            .collect();
        count(ids.len())
    }
}

fn local_recommendations(
    summary: &InsightsSummary,
    attendance: &AttendanceInsights,
    performance: &PerformanceInsights,
    trends: &Trends,
) -> Vec<String> {
    let attendance = attendance.breakdown();
    let performance = performance.breakdown();
    if attendance.is_none() && performance.is_none() {
        return vec!["Record attendance and grades to unlock insights".to_string()];
    }

    let mut out = Vec::new();
    if summary.status == PerformanceStatus::Excellent {
        out.push("Maintain current teaching strategies and keep stretching high achievers".to_string());
    }
    if let Some(breakdown) = attendance {
        if breakdown.attendance_rate_percent < GOOD_ATTENDANCE {
            out.push(
                "Improve attendance by following up with families of frequently absent students"
                    .to_string(),
            );
        }
        if !breakdown.chronic_absentees.is_empty() {
            out.push(format!(
                "Arrange guardian meetings for {} chronically absent student(s)",
                breakdown.chronic_absentees.len()
            ));
        }
    }
    if let Some(breakdown) = performance {
        if breakdown.average_percent < GOOD_PERFORMANCE {
            out.push("Plan remedial sessions that revisit the weakest topics".to_string());
        }
        if !breakdown.struggling_students.is_empty() {
            out.push(format!(
                "Offer targeted support to {}",
                breakdown.struggling_students.join(", ")
            ));
        }
    }
    if trends.attendance == TrendDirection::Declining {
        out.push("Investigate the recent drop in attendance".to_string());
    }
    if trends.performance == TrendDirection::Declining {
        out.push("Review recent lessons; performance is falling".to_string());
    }
    if out.is_empty() {
        out.push("Continue monitoring attendance and performance weekly".to_string());
    }
    out
}

fn local_interventions(
    summary: &InsightsSummary,
    attendance: &AttendanceInsights,
    performance: &PerformanceInsights,
) -> Vec<Intervention> {
    let mut out = Vec::new();
    if let Some(breakdown) = attendance.breakdown() {
        out.extend(breakdown.chronic_absentees.iter().map(|name| Intervention {
            kind: InterventionKind::Attendance,
            target: name.clone(),
            action: "Contact guardian to discuss attendance".to_string(),
        }));
    }
    if let Some(breakdown) = performance.breakdown() {
        out.extend(breakdown.struggling_students.iter().map(|name| Intervention {
            kind: InterventionKind::Academic,
            target: name.clone(),
            action: "Schedule small-group remedial support".to_string(),
        }));
    }
    let has_data = attendance.breakdown().is_some() || performance.breakdown().is_some();
    if has_data && summary.status == PerformanceStatus::NeedsAttention {
        out.push(Intervention {
            kind: InterventionKind::ClassWide,
            target: "Whole class".to_string(),
            action: "Review teaching pace and revisit foundational topics".to_string(),
        });
    }
    out
}

/// Split records into chronological halves, or `None` below the trend minimum.
/// An odd record goes to the second half.
fn halves_by_date<T>(
    records: &[T],
    date: impl Fn(&T) -> NaiveDate,
) -> Option<(Vec<&T>, Vec<&T>)> {
    if records.len() < MIN_TREND_RECORDS {
        return None;
    }
    let mut sorted: Vec<&T> = records.iter().collect();
    sorted.sort_by_key(|r| date(r));
    let second = sorted.split_off(sorted.len() / 2);
    Some((sorted, second))
}

fn direction(before: f64, after: f64) -> TrendDirection {
    let change = after - before;
    if change > TREND_THRESHOLD {
        TrendDirection::Improving
    } else if change < -TREND_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

fn busiest_absence_day(records: &[AttendanceRecord]) -> Option<(Weekday, u32)> {
    let mut by_day = [0u32; 7];
    for record in records {
        if record.status == AttendanceStatus::Absent {
            by_day[record.date.weekday().num_days_from_monday() as usize] += 1;
        }
    }
    let mut best: Option<(Weekday, u32)> = None;
    let mut day = Weekday::Mon;
    for absences in by_day {
        if absences > 0 && best.is_none_or(|(_, n)| absences > n) {
            best = Some((day, absences));
        }
        day = day.succ();
    }
    best
}

const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn student_name(id: &str, students: &[StudentRecord]) -> String {
    students
        .iter()
        .find(|s| s.id == id)
        .map_or_else(|| id.to_string(), |s| s.name.clone())
}

fn percent(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(f64::from(part) * 100.0 / f64::from(total))
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
