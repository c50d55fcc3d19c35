mod assembly;
pub mod views;

pub use assembly::ReportAssembler;
pub use views::{
    AttendanceSummary, BehaviorAssessment, LearningAreaSummary, ReportCardData,
    SubjectAreaSection, SubjectLine, TranscriptData, TranscriptSemester,
};
