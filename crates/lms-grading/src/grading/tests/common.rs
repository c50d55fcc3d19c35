use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::grading::domain::{
    GradeRecord, ScoreComponents, Semester, SemesterId, StudentId, StudentProfile, SubjectId,
    SubjectInstanceId, SubjectInstanceRef,
};
use crate::grading::report::{AttendanceSummary, BehaviorAssessment};
use crate::grading::repository::{AttendanceSource, GradeRepository, RepositoryError};
use crate::grading::{GradingPolicy, GradingService, NoAttendance, ScaleMode};

pub(super) fn student_id() -> StudentId {
    StudentId("s-001".to_string())
}

pub(super) fn student() -> StudentProfile {
    StudentProfile {
        id: student_id(),
        full_name: "Somchai Jaidee".to_string(),
        student_number: Some("10234".to_string()),
        grade_level: Some("M.1".to_string()),
    }
}

pub(super) fn first_term() -> Semester {
    Semester {
        id: SemesterId("2567-1".to_string()),
        academic_year: 2567,
        term: 1,
        start_date: NaiveDate::from_ymd_opt(2024, 5, 16).expect("valid date"),
    }
}

pub(super) fn second_term() -> Semester {
    Semester {
        id: SemesterId("2567-2".to_string()),
        academic_year: 2567,
        term: 2,
        start_date: NaiveDate::from_ymd_opt(2024, 11, 1).expect("valid date"),
    }
}

pub(super) fn scores(classwork: f64, midterm: f64, final_exam: f64) -> ScoreComponents {
    ScoreComponents {
        classwork: Some(classwork),
        midterm: Some(midterm),
        final_exam: Some(final_exam),
        behavior: None,
    }
}

/// 85% under the default 30/20/50 split.
pub(super) fn grade_four() -> ScoreComponents {
    scores(25.0, 15.0, 45.0)
}

/// 76%.
pub(super) fn grade_three_and_a_half() -> ScoreComponents {
    scores(22.0, 16.0, 38.0)
}

/// 71%.
pub(super) fn grade_three() -> ScoreComponents {
    scores(20.0, 14.0, 37.0)
}

/// 40%.
pub(super) fn failing() -> ScoreComponents {
    scores(10.0, 10.0, 20.0)
}

pub(super) fn record(
    semester: &Semester,
    subject_code: &str,
    area_code: &str,
    credits: f64,
    components: ScoreComponents,
) -> GradeRecord {
    GradeRecord {
        student_id: student_id(),
        subject: SubjectInstanceRef {
            id: SubjectInstanceId(format!("{}:{}", semester.id, subject_code)),
            subject_id: SubjectId(subject_code.to_string()),
            subject_code: subject_code.to_string(),
            subject_name: format!("Subject {subject_code}"),
            area_code: area_code.to_string(),
            credits,
            semester_id: semester.id.clone(),
        },
        grading_period_id: None,
        components,
        remarks: None,
    }
}

pub(super) fn build_service() -> (
    GradingService<MemoryGradeRepository, NoAttendance>,
    Arc<MemoryGradeRepository>,
) {
    build_service_with(GradingPolicy::default())
}

pub(super) fn build_service_with(
    policy: GradingPolicy,
) -> (
    GradingService<MemoryGradeRepository, NoAttendance>,
    Arc<MemoryGradeRepository>,
) {
    let repository = Arc::new(MemoryGradeRepository::default());
    repository.add_student(student());
    let service = GradingService::new(repository.clone(), Arc::new(NoAttendance), policy);
    (service, repository)
}

pub(super) fn strict_policy() -> GradingPolicy {
    let mut policy = GradingPolicy::default();
    policy.scale.mode = ScaleMode::Strict;
    policy
}

#[derive(Default, Clone)]
pub(super) struct MemoryGradeRepository {
    students: Arc<Mutex<HashMap<StudentId, StudentProfile>>>,
    enrollments: Arc<Mutex<HashMap<StudentId, Vec<Semester>>>>,
    records: Arc<Mutex<Vec<GradeRecord>>>,
}

impl MemoryGradeRepository {
    pub(super) fn add_student(&self, profile: StudentProfile) {
        self.students
            .lock()
            .expect("repository mutex poisoned")
            .insert(profile.id.clone(), profile);
    }

    pub(super) fn enroll(&self, semester: Semester) {
        self.enrollments
            .lock()
            .expect("repository mutex poisoned")
            .entry(student_id())
            .or_default()
            .push(semester);
    }

    pub(super) fn insert(&self, record: GradeRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record);
    }
}

impl GradeRepository for MemoryGradeRepository {
    fn fetch_grades_for_student(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Vec<GradeRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
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
        let guard = self.enrollments.lock().expect("repository mutex poisoned");
        Ok(guard.get(student_id).cloned().unwrap_or_default())
    }

    fn student(&self, student_id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        let guard = self.students.lock().expect("repository mutex poisoned");
        Ok(guard.get(student_id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl GradeRepository for UnavailableRepository {
    fn fetch_grades_for_student(
        &self,
        _student_id: &StudentId,
        _semester_id: &SemesterId,
    ) -> Result<Vec<GradeRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn semesters_for_student(
        &self,
        _student_id: &StudentId,
    ) -> Result<Vec<Semester>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn student(&self, _student_id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAttendance {
    pub(super) attendance: Option<AttendanceSummary>,
    pub(super) behavior: Option<BehaviorAssessment>,
}

impl AttendanceSource for MemoryAttendance {
    fn attendance(
        &self,
        _student_id: &StudentId,
        _semester_id: &SemesterId,
    ) -> Result<Option<AttendanceSummary>, RepositoryError> {
        Ok(self.attendance)
    }

    fn behavior(
        &self,
        _student_id: &StudentId,
        _semester_id: &SemesterId,
    ) -> Result<Option<BehaviorAssessment>, RepositoryError> {
        Ok(self.behavior.clone())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
