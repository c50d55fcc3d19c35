use serde::Serialize;

use super::aggregate::Grade;
use super::domain::SubjectInstanceRef;
use super::scale::is_passing;

/// A computed grade paired with the subject instance that carries its credits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectGrade {
    pub subject: SubjectInstanceRef,
    pub grade: Grade,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: f64,
    pub earned_credits: f64,
}

/// Half-up rounding to two decimals. The nudge keeps values such as 3.745, which binary
/// floating point stores just below the midpoint, rounding up.
///
/// Grade points and credits come in 0.5 steps, so a weighted average over `q` total credits
/// that is not exactly on a midpoint sits at least `0.25 / q` hundredths away from it. The
/// fixed `1e-9` nudge is far below that bound for any realistic credit load.
pub fn round_half_up_2(value: f64) -> f64 {
    ((value * 100.0) + 0.5 + 1e-9).floor() / 100.0
}

/// Credit-weighted average over `(grade_point, credits)` pairs.
pub(crate) fn weighted_average<I>(entries: I) -> GpaSummary
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut weighted_points = 0.0;
    let mut total_credits = 0.0;
    let mut earned_credits = 0.0;

    for (point, credits) in entries {
        weighted_points += point * credits;
        total_credits += credits;
        if is_passing(point) {
            earned_credits += credits;
        }
    }

    if total_credits <= 0.0 {
        return GpaSummary::default();
    }

    GpaSummary {
        gpa: round_half_up_2(weighted_points / total_credits),
        total_credits,
        earned_credits,
    }
}

/// Semester GPA. Ungraded subjects carry no weight at all; at most one grade per
/// (student, subject instance) is expected from the caller.
pub fn calculate_gpa(grades: &[SubjectGrade]) -> GpaSummary {
    weighted_average(grades.iter().filter_map(|entry| {
        entry
            .grade
            .grade_point()
            .map(|point| (point, entry.subject.credits))
    }))
}
