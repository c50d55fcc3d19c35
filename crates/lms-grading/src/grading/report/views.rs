use serde::{Deserialize, Serialize};

use super::super::domain::{Semester, StudentProfile};
use super::super::gpa::{GpaSummary, SubjectGrade};
use super::super::gpax::SemesterGpa;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectLine {
    pub subject_code: String,
    pub subject_name: String,
    pub credits: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_point: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl SubjectLine {
    pub(crate) fn from_subject_grade(entry: &SubjectGrade) -> Self {
        let result = entry.grade.result();
        Self {
            subject_code: entry.subject.subject_code.clone(),
            subject_name: entry.subject.subject_name.clone(),
            credits: entry.subject.credits,
            total_score: result.map(|r| r.total_score),
            percentage: result.map(|r| r.percentage),
            grade_point: result.map(|r| r.grade_point),
            grade_label: result.map(|r| r.grade_label),
            descriptor: result.map(|r| r.descriptor),
            remarks: entry.grade.remarks().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAreaSection {
    pub area_code: String,
    pub area_name: String,
    pub subjects: Vec<SubjectLine>,
}

/// Attendance figures supplied by the attendance collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub school_days: u16,
    pub present: u16,
    pub absent: u16,
    pub late: u16,
    pub leave: u16,
}

impl AttendanceSummary {
    pub fn attendance_rate(&self) -> Option<f64> {
        if self.school_days == 0 {
            return None;
        }
        Some(f64::from(self.present) / f64::from(self.school_days) * 100.0)
    }
}

/// Non-credit assessments printed beside the grades (คุณลักษณะอันพึงประสงค์, การอ่าน คิดวิเคราะห์
/// และเขียน, กิจกรรมพัฒนาผู้เรียน).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_characteristics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_thinking_writing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learner_activities: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCardData {
    pub student: StudentProfile,
    pub semester: Semester,
    pub semester_label: String,
    pub subject_areas: Vec<SubjectAreaSection>,
    pub gpa: GpaSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<BehaviorAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptSemester {
    #[serde(flatten)]
    pub gpa: SemesterGpa,
    pub subject_areas: Vec<SubjectAreaSection>,
}

/// Per learning area totals across the whole transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningAreaSummary {
    pub area_code: String,
    pub area_name: String,
    #[serde(flatten)]
    pub summary: GpaSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptData {
    pub student: StudentProfile,
    pub semesters: Vec<TranscriptSemester>,
    pub learning_areas: Vec<LearningAreaSummary>,
    pub gpax: f64,
    pub total_credits: f64,
    pub earned_credits: f64,
}
