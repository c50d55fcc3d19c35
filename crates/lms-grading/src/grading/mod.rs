//! Grading and academic progress engine.
//!
//! Raw component scores flow through validation and aggregation into grades, grades are
//! credit-weighted into semester GPA and cumulative GPAX, and the results are reshaped into
//! report-card and transcript view-models. All computation is pure; the data-access layer is
//! injected through [`GradeRepository`] and [`AttendanceSource`].

pub mod aggregate;
pub mod domain;
pub mod gpa;
pub mod gpax;
pub mod import;
pub mod policy;
pub mod report;
pub mod repository;
pub mod router;
pub mod scale;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, ComponentMaximums, Grade, GradeError, GradeResult};
pub use domain::{
    GradeRecord, GradingPeriodId, ScoreComponent, ScoreComponents, Semester, SemesterId,
    StudentId, StudentProfile, SubjectArea, SubjectId, SubjectInstanceId, SubjectInstanceRef,
};
pub use gpa::{calculate_gpa, GpaSummary, SubjectGrade};
pub use gpax::{calculate_gpax, GpaxResult, SemesterGpa, SemesterGrades};
pub use import::{ScoreSheet, ScoreSheetImportError, ScoreSheetImporter};
pub use policy::GradingPolicy;
pub use report::{ReportAssembler, ReportCardData, TranscriptData};
pub use repository::{AttendanceSource, GradeRepository, NoAttendance, RepositoryError};
pub use router::grading_router;
pub use scale::{
    grade_label_for_point, grade_point_for_percentage, GradeScale, ScaleError, ScaleMode,
};
pub use service::{GradePreview, GradingService, GradingServiceError};
pub use validation::ValidationError;
