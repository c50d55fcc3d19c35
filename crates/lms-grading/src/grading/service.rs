use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::aggregate::{Grade, GradeError, GradeResult};
use super::domain::{GradeRecord, ScoreComponents, Semester, SemesterId, StudentId, StudentProfile};
use super::gpa::{calculate_gpa, SubjectGrade};
use super::gpax::{calculate_gpax, GpaxResult, SemesterGpa, SemesterGrades};
use super::policy::GradingPolicy;
use super::report::{ReportAssembler, ReportCardData, TranscriptData};
use super::repository::{AttendanceSource, GradeRepository, RepositoryError};
use super::scale::ScaleError;
use super::validation::{validate_record, ValidationError};

/// Service composing the grade repository, attendance collaborator and grading policy.
/// Every operation recomputes from the current repository snapshot; nothing is cached.
pub struct GradingService<R, A> {
    repository: Arc<R>,
    attendance: Arc<A>,
    policy: Arc<GradingPolicy>,
}

/// Result of grading a set of components without persisting anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradePreview {
    pub components: ScoreComponents,
    pub graded: bool,
    #[serde(flatten)]
    pub result: Option<GradeResult>,
}

impl<R, A> GradingService<R, A>
where
    R: GradeRepository + 'static,
    A: AttendanceSource + 'static,
{
    pub fn new(repository: Arc<R>, attendance: Arc<A>, policy: GradingPolicy) -> Self {
        Self {
            repository,
            attendance,
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    /// Grade a set of component scores under the configured policy.
    pub fn grade_preview(
        &self,
        components: ScoreComponents,
    ) -> Result<GradePreview, GradingServiceError> {
        let result = GradeResult::derive(&components, &self.policy)?;
        Ok(GradePreview {
            components,
            graded: result.is_some(),
            result,
        })
    }

    /// Validated, computed grades for one student in one semester.
    pub fn semester_grades(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Vec<SubjectGrade>, GradingServiceError> {
        let records = self
            .repository
            .fetch_grades_for_student(student_id, semester_id)?;
        records
            .into_iter()
            .filter(|record| {
                let matches = &record.subject.semester_id == semester_id;
                if !matches {
                    warn!(
                        student = %student_id,
                        semester = %semester_id,
                        subject_instance = %record.subject.id,
                        "repository returned a grade from another semester; skipping"
                    );
                }
                matches
            })
            .map(|record| self.compute(record))
            .collect()
    }

    pub fn semester_gpa(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<SemesterGpa, GradingServiceError> {
        let semester = self.semester(student_id, semester_id)?;
        let grades = self.semester_grades(student_id, semester_id)?;
        let gpa = SemesterGpa::from_grades(&semester, &grades);
        debug!(
            student = %student_id,
            semester = %semester_id,
            gpa = gpa.gpa(),
            credits = gpa.total_credits(),
            "semester gpa computed"
        );
        Ok(gpa)
    }

    pub fn gpax(&self, student_id: &StudentId) -> Result<GpaxResult, GradingServiceError> {
        self.student(student_id)?;
        let history = self.history(student_id)?;
        let result = calculate_gpax(&history);
        debug!(
            student = %student_id,
            gpax = result.gpax,
            semesters = result.semesters.len(),
            "gpax computed"
        );
        Ok(result)
    }

    pub fn report_card(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<ReportCardData, GradingServiceError> {
        let student = self.student(student_id)?;
        let semester = self.semester(student_id, semester_id)?;
        let grades = self.semester_grades(student_id, semester_id)?;
        let gpa = calculate_gpa(&grades);
        let attendance = self.attendance.attendance(student_id, semester_id)?;
        let behavior = self.attendance.behavior(student_id, semester_id)?;

        debug!(
            student = %student_id,
            semester = %semester_id,
            subjects = grades.len(),
            "report card assembled"
        );
        Ok(ReportAssembler::new(&self.policy.areas).report_card(
            student, semester, &grades, gpa, attendance, behavior,
        ))
    }

    pub fn transcript(&self, student_id: &StudentId) -> Result<TranscriptData, GradingServiceError> {
        let student = self.student(student_id)?;
        let history = self.history(student_id)?;
        let gpax = calculate_gpax(&history);

        debug!(
            student = %student_id,
            semesters = history.len(),
            gpax = gpax.gpax,
            "transcript assembled"
        );
        Ok(ReportAssembler::new(&self.policy.areas).transcript(student, &history, gpax))
    }

    fn compute(&self, record: GradeRecord) -> Result<SubjectGrade, GradingServiceError> {
        if let Err(error) = validate_record(&record, &self.policy.maximums, self.policy.scale.mode)
        {
            warn!(
                student = %record.student_id,
                subject_instance = %record.subject.id,
                %error,
                "grade record rejected"
            );
            return Err(error.into());
        }

        let grade = Grade::from_record(&record, &self.policy)?;
        Ok(SubjectGrade {
            subject: record.subject,
            grade,
        })
    }

    fn student(&self, student_id: &StudentId) -> Result<StudentProfile, GradingServiceError> {
        self.repository
            .student(student_id)?
            .ok_or_else(|| GradingServiceError::StudentNotFound(student_id.clone()))
    }

    fn semesters(&self, student_id: &StudentId) -> Result<Vec<Semester>, GradingServiceError> {
        let mut semesters = self.repository.semesters_for_student(student_id)?;
        let mut seen = Vec::with_capacity(semesters.len());
        semesters.retain(|semester| {
            if seen.contains(&semester.id) {
                false
            } else {
                seen.push(semester.id.clone());
                true
            }
        });
        Ok(semesters)
    }

    fn semester(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Semester, GradingServiceError> {
        self.semesters(student_id)?
            .into_iter()
            .find(|semester| &semester.id == semester_id)
            .ok_or_else(|| GradingServiceError::SemesterNotFound {
                student_id: student_id.clone(),
                semester_id: semester_id.clone(),
            })
    }

    /// Grades for every semester the student has, in chronological order.
    fn history(&self, student_id: &StudentId) -> Result<Vec<SemesterGrades>, GradingServiceError> {
        let mut history = Vec::new();
        for semester in self.semesters(student_id)? {
            let grades = self.semester_grades(student_id, &semester.id)?;
            history.push(SemesterGrades { semester, grades });
        }
        history.sort_by(|a, b| {
            a.semester
                .chronological_key()
                .cmp(&b.semester.chronological_key())
        });
        Ok(history)
    }
}

/// Error raised by the grading service.
#[derive(Debug, thiserror::Error)]
pub enum GradingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Scale(#[from] ScaleError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("semester {semester_id} not found for student {student_id}")]
    SemesterNotFound {
        student_id: StudentId,
        semester_id: SemesterId,
    },
}

impl From<GradeError> for GradingServiceError {
    fn from(value: GradeError) -> Self {
        match value {
            GradeError::Validation(error) => Self::Validation(error),
            GradeError::Scale(error) => Self::Scale(error),
        }
    }
}
