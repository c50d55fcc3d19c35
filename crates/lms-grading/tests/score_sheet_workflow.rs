use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use lms_grading::grading::{
    grading_router, GradeRecord, GradeRepository, GradingPolicy, GradingService, NoAttendance,
    RepositoryError, ScoreSheet, ScoreSheetImporter, Semester, SemesterId, StudentId,
    StudentProfile,
};
use tower::ServiceExt;

struct SheetRepository(ScoreSheet);

impl GradeRepository for SheetRepository {
    fn fetch_grades_for_student(
        &self,
        student_id: &StudentId,
        semester_id: &SemesterId,
    ) -> Result<Vec<GradeRecord>, RepositoryError> {
        Ok(self
            .0
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
        Ok(self
            .0
            .semesters
            .iter()
            .filter(|semester| {
                self.0.records.iter().any(|record| {
                    &record.student_id == student_id && record.subject.semester_id == semester.id
                })
            })
            .cloned()
            .collect())
    }

    fn student(&self, student_id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        Ok(self
            .0
            .students
            .iter()
            .find(|student| &student.id == student_id)
            .cloned())
    }
}

fn sample_service() -> GradingService<SheetRepository, NoAttendance> {
    let data = include_bytes!("../sample_score_sheet.csv");
    let sheet = ScoreSheetImporter::from_reader(&data[..]).expect("sample sheet imports");
    GradingService::new(
        Arc::new(SheetRepository(sheet)),
        Arc::new(NoAttendance),
        GradingPolicy::default(),
    )
}

fn somchai() -> StudentId {
    StudentId("s-001".to_string())
}

#[test]
fn sample_sheet_imports_every_row() {
    let data = include_bytes!("../sample_score_sheet.csv");
    let sheet = ScoreSheetImporter::from_reader(&data[..]).expect("sample sheet imports");

    assert_eq!(sheet.students.len(), 2);
    assert_eq!(sheet.semesters.len(), 2);
    assert_eq!(sheet.records.len(), 10);
    assert_eq!(sheet.students[0].grade_level.as_deref(), Some("ม.1"));
}

#[test]
fn transcript_is_chronological_even_when_the_sheet_is_not() {
    let transcript = sample_service()
        .transcript(&somchai())
        .expect("transcript assembles");

    let labels: Vec<&str> = transcript
        .semesters
        .iter()
        .map(|semester| semester.gpa.semester_label.as_str())
        .collect();
    assert_eq!(labels, vec!["1/2567", "2/2567"]);
    assert_eq!(transcript.semesters[0].gpa.gpa(), 3.23);
    assert_eq!(transcript.semesters[1].gpa.gpa(), 2.93);
    assert_eq!(transcript.gpax, 3.11);
    assert_eq!(transcript.total_credits, 9.0);
    assert_eq!(transcript.earned_credits, 9.0);
}

#[test]
fn ungraded_independent_study_is_listed_without_weight() {
    let card = sample_service()
        .report_card(&somchai(), &SemesterId("2567-2".to_string()))
        .expect("report card assembles");

    let last = card.subject_areas.last().expect("sections present");
    assert_eq!(last.area_code, "IS");
    assert_eq!(last.subjects[0].grade_point, None);
    assert_eq!(last.subjects[0].remarks.as_deref(), Some("มส"));
    assert_eq!(card.gpa.total_credits, 3.5);
    assert_eq!(card.gpa.gpa, 2.93);
}

#[test]
fn failing_subjects_reduce_earned_credits() {
    let gpa = sample_service()
        .semester_gpa(
            &StudentId("s-002".to_string()),
            &SemesterId("2567-1".to_string()),
        )
        .expect("gpa computes");

    assert_eq!(gpa.gpa(), 1.75);
    assert_eq!(gpa.total_credits(), 3.0);
    assert_eq!(gpa.summary.earned_credits, 1.5);
}

#[tokio::test]
async fn router_serves_sample_transcript() {
    let router = grading_router(Arc::new(sample_service()));

    let response = router
        .oneshot(
            Request::get("/api/v1/students/s-001/gpax")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["gpax"], serde_json::json!(3.11));
}
