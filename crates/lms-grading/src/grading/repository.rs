use super::domain::{GradeRecord, Semester, SemesterId, StudentId, StudentProfile};
use super::report::{AttendanceSummary, BehaviorAssessment};

/// Data-access seam for grade rows. Implementations must hand back a consistent snapshot
/// for a single call; the engine does no locking or retries of its own.
pub trait GradeRepository: Send + Sync {
    fn fetch_grades_for_student(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Vec<GradeRecord>, RepositoryError>;

    /// Every semester in which the student holds grades, in any order.
    fn semesters_for_student(&self, student_id: &StudentId)
        -> Result<Vec<Semester>, RepositoryError>;

    fn student(&self, student_id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError>;
}

/// Attendance and behavior data owned by other parts of the school system.
pub trait AttendanceSource: Send + Sync {
    fn attendance(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Option<AttendanceSummary>, RepositoryError>;

    fn behavior(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Option<BehaviorAssessment>, RepositoryError>;
}

/// Attendance source for deployments that do not track attendance.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAttendance;

impl AttendanceSource for NoAttendance {
    fn attendance(
        &self,
        _student_id: &StudentId,
        _semester_id: &SemesterId,
    ) -> Result<Option<AttendanceSummary>, RepositoryError> {
        Ok(None)
    }

    fn behavior(
        &self,
        _student_id: &StudentId,
        _semester_id: &SemesterId,
    ) -> Result<Option<BehaviorAssessment>, RepositoryError> {
        Ok(None)
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
