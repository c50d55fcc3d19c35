use lms_grading::config::GradingConfig;
use lms_grading::grading::{
    GradeRecord, GradeRepository, GradingPolicy, GradingService, NoAttendance, RepositoryError,
    ScoreSheet, Semester, SemesterId, StudentId, StudentProfile,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock, RwLockReadGuard};

pub(crate) type AppGradingService = GradingService<InMemoryGradeRepository, NoAttendance>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) repository: InMemoryGradeRepository,
}

/// Repository backed by the most recently loaded score sheet. Replacing the sheet swaps the
/// whole snapshot at once, so a single repository call never sees a half-imported sheet.
/// A report built from several calls can still straddle a swap made in between them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryGradeRepository {
    sheet: Arc<RwLock<ScoreSheet>>,
}

impl InMemoryGradeRepository {
    pub(crate) fn from_sheet(sheet: ScoreSheet) -> Self {
        Self {
            sheet: Arc::new(RwLock::new(sheet)),
        }
    }

    pub(crate) fn replace(&self, sheet: ScoreSheet) -> Result<(), RepositoryError> {
        let mut guard = self
            .sheet
            .write()
            .map_err(|_| RepositoryError::Unavailable("score sheet lock poisoned".to_string()))?;
        *guard = sheet;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ScoreSheet>, RepositoryError> {
        self.sheet
            .read()
            .map_err(|_| RepositoryError::Unavailable("score sheet lock poisoned".to_string()))
    }
}

impl GradeRepository for InMemoryGradeRepository {
    fn fetch_grades_for_student(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Vec<GradeRecord>, RepositoryError> {
        let sheet = self.read()?;
        Ok(sheet
            .records
            .iter()
            .filter(|record| {
                &record.student_id == student_id && &record.subject.semester_id == semester_id
            })
            .cloned()
            .collect())
    }

    fn semesters_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Semester>, RepositoryError> {
        let sheet = self.read()?;
        Ok(sheet
            .semesters
            .iter()
            .filter(|semester| {
                sheet.records.iter().any(|record| {
                    &record.student_id == student_id && record.subject.semester_id == semester.id
                })
            })
            .cloned()
            .collect())
    }

    fn student(&self, student_id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        let sheet = self.read()?;
        Ok(sheet
            .students
            .iter()
            .find(|student| &student.id == student_id)
            .cloned())
    }
}

/// Counts reported back after a score sheet import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ImportSummary {
    pub(crate) students: usize,
    pub(crate) semesters: usize,
    pub(crate) records: usize,
}

impl From<&ScoreSheet> for ImportSummary {
    fn from(sheet: &ScoreSheet) -> Self {
        Self {
            students: sheet.students.len(),
            semesters: sheet.semesters.len(),
            records: sheet.records.len(),
        }
    }
}

pub(crate) fn grading_service(
    repository: InMemoryGradeRepository,
    config: &GradingConfig,
) -> AppGradingService {
    GradingService::new(
        Arc::new(repository),
        Arc::new(NoAttendance),
        GradingPolicy::from_config(config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_grading::grading::ScoreSheetImporter;

    const SHEET: &str = "student_id,student_name,semester_id,academic_year,term,semester_start,subject_id,subject_code,subject_name,subject_area,credits,classwork,midterm,final,behavior,remarks\n\
s-001,Somchai Jaidee,2567-1,2567,1,2024-05-16,ท21101,ท21101,ภาษาไทย 1,ท,1.5,25,15,45,,\n\
s-002,Suda Rakrian,2567-2,2567,2,2024-11-01,ท21102,ท21102,ภาษาไทย 2,ท,1.5,20,10,30,,\n";

    fn repository() -> InMemoryGradeRepository {
        let sheet = ScoreSheetImporter::from_reader(SHEET.as_bytes()).expect("sheet imports");
        InMemoryGradeRepository::from_sheet(sheet)
    }

    #[test]
    fn semesters_are_limited_to_those_with_grades() {
        let semesters = repository()
            .semesters_for_student(&StudentId("s-001".to_string()))
            .expect("semesters load");
        assert_eq!(semesters.len(), 1);
        assert_eq!(semesters[0].id, SemesterId("2567-1".to_string()));
    }

    #[test]
    fn replace_swaps_the_snapshot() {
        let repository = repository();
        repository
            .replace(ScoreSheet::default())
            .expect("replace succeeds");

        let student = repository
            .student(&StudentId("s-001".to_string()))
            .expect("lookup succeeds");
        assert!(student.is_none());
    }

    #[test]
    fn summary_counts_sheet_contents() {
        let sheet = ScoreSheetImporter::from_reader(SHEET.as_bytes()).expect("sheet imports");
        assert_eq!(
            ImportSummary::from(&sheet),
            ImportSummary {
                students: 2,
                semesters: 2,
                records: 2,
            }
        );
    }
}
