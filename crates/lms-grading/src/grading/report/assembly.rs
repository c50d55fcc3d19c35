use super::super::domain::{Semester, StudentProfile, SubjectArea};
use super::super::gpa::{calculate_gpa, GpaSummary, SubjectGrade};
use super::super::gpax::{GpaxResult, SemesterGrades};
use super::views::{
    AttendanceSummary, BehaviorAssessment, LearningAreaSummary, ReportCardData,
    SubjectAreaSection, SubjectLine, TranscriptData, TranscriptSemester,
};

/// Reshapes computed grades into printable view-models. Grouping follows the declared
/// learning-area order; areas missing from the catalog follow in first-seen order.
pub struct ReportAssembler<'a> {
    areas: &'a [SubjectArea],
}

struct AreaGroup<'g> {
    code: String,
    name: String,
    members: Vec<&'g SubjectGrade>,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(areas: &'a [SubjectArea]) -> Self {
        Self { areas }
    }

    fn group<'g>(&self, grades: &'g [SubjectGrade]) -> Vec<AreaGroup<'g>> {
        let mut groups: Vec<AreaGroup<'g>> = self
            .areas
            .iter()
            .map(|area| AreaGroup {
                code: area.code.clone(),
                name: area.name.clone(),
                members: Vec::new(),
            })
            .collect();

        for entry in grades {
            let code = &entry.subject.area_code;
            match groups.iter().position(|group| &group.code == code) {
                Some(index) => groups[index].members.push(entry),
                None => groups.push(AreaGroup {
                    code: code.clone(),
                    name: code.clone(),
                    members: vec![entry],
                }),
            }
        }

        groups.retain(|group| !group.members.is_empty());
        groups
    }

    /// Groups grades by learning area, keeping each area's subjects in input order.
    pub fn sections(&self, grades: &[SubjectGrade]) -> Vec<SubjectAreaSection> {
        self.group(grades)
            .into_iter()
            .map(|group| SubjectAreaSection {
                area_code: group.code,
                area_name: group.name,
                subjects: group
                    .members
                    .into_iter()
                    .map(SubjectLine::from_subject_grade)
                    .collect(),
            })
            .collect()
    }

    pub fn report_card(
        &self,
        student: StudentProfile,
        semester: Semester,
        grades: &[SubjectGrade],
        gpa: GpaSummary,
        attendance: Option<AttendanceSummary>,
        behavior: Option<BehaviorAssessment>,
    ) -> ReportCardData {
        ReportCardData {
            semester_label: semester.label(),
            student,
            semester,
            subject_areas: self.sections(grades),
            gpa,
            attendance,
            behavior,
        }
    }

    /// Builds the transcript in the semester order already fixed by `gpax`.
    pub fn transcript(
        &self,
        student: StudentProfile,
        history: &[SemesterGrades],
        gpax: GpaxResult,
    ) -> TranscriptData {
        let GpaxResult {
            gpax,
            total_credits,
            earned_credits,
            semesters,
        } = gpax;

        let semesters = semesters
            .into_iter()
            .map(|semester_gpa| {
                let subject_areas = history
                    .iter()
                    .find(|entry| &entry.semester.id == semester_gpa.semester_id())
                    .map(|entry| self.sections(&entry.grades))
                    .unwrap_or_default();
                TranscriptSemester {
                    gpa: semester_gpa,
                    subject_areas,
                }
            })
            .collect();

        let all_grades: Vec<SubjectGrade> = history
            .iter()
            .flat_map(|entry| entry.grades.iter().cloned())
            .collect();
        let learning_areas = self
            .group(&all_grades)
            .into_iter()
            .map(|group| {
                let members: Vec<SubjectGrade> = group.members.into_iter().cloned().collect();
                LearningAreaSummary {
                    area_code: group.code,
                    area_name: group.name,
                    summary: calculate_gpa(&members),
                }
            })
            .collect();

        TranscriptData {
            student,
            semesters,
            learning_areas,
            gpax,
            total_credits,
            earned_credits,
        }
    }
}
