use serde::Serialize;

use super::domain::{Semester, SemesterId};
use super::gpa::{calculate_gpa, weighted_average, GpaSummary, SubjectGrade};

/// All grades a student holds in one semester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterGrades {
    pub semester: Semester,
    pub grades: Vec<SubjectGrade>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterGpa {
    pub semester: Semester,
    pub semester_label: String,
    #[serde(flatten)]
    pub summary: GpaSummary,
}

impl SemesterGpa {
    pub fn from_grades(semester: &Semester, grades: &[SubjectGrade]) -> Self {
        Self {
            semester: semester.clone(),
            semester_label: semester.label(),
            summary: calculate_gpa(grades),
        }
    }

    pub fn semester_id(&self) -> &SemesterId {
        &self.semester.id
    }

    pub fn gpa(&self) -> f64 {
        self.summary.gpa
    }

    pub fn total_credits(&self) -> f64 {
        self.summary.total_credits
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GpaxResult {
    pub gpax: f64,
    pub total_credits: f64,
    pub earned_credits: f64,
    /// Chronological by semester start date.
    pub semesters: Vec<SemesterGpa>,
}

/// Orders semesters by start date (ties broken by id) regardless of how they were supplied.
pub fn chronological<'a, I>(semesters: I) -> Vec<&'a SemesterGrades>
where
    I: IntoIterator<Item = &'a SemesterGrades>,
{
    let mut ordered: Vec<&SemesterGrades> = semesters.into_iter().collect();
    ordered.sort_by(|a, b| {
        a.semester
            .chronological_key()
            .cmp(&b.semester.chronological_key())
    });
    ordered
}

/// Cumulative GPA weighted by each semester's graded credits. Semesters without graded
/// credits stay in the history with a zero GPA but add nothing to the weighting.
pub fn calculate_gpax<'a, I>(semesters: I) -> GpaxResult
where
    I: IntoIterator<Item = &'a SemesterGrades>,
{
    let history: Vec<SemesterGpa> = chronological(semesters)
        .into_iter()
        .map(|entry| SemesterGpa::from_grades(&entry.semester, &entry.grades))
        .collect();

    let cumulative = weighted_average(
        history
            .iter()
            .filter(|semester| semester.total_credits() > 0.0)
            .map(|semester| (semester.gpa(), semester.total_credits())),
    );
    let earned_credits = history
        .iter()
        .fold(0.0, |acc, semester| acc + semester.summary.earned_credits);

    GpaxResult {
        gpax: cumulative.gpa,
        total_credits: cumulative.total_credits,
        earned_credits,
        semesters: history,
    }
}
