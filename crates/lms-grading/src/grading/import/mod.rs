mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::{
    GradeRecord, GradingPeriodId, ScoreComponents, Semester, SemesterId, StudentId,
    StudentProfile, SubjectId, SubjectInstanceId, SubjectInstanceRef,
};
use parser::ScoreSheetRow;

#[derive(Debug)]
pub enum ScoreSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDate { line: usize, value: String },
    Conflict { line: usize, detail: String },
}

impl std::fmt::Display for ScoreSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreSheetImportError::Io(err) => write!(f, "failed to read score sheet: {}", err),
            ScoreSheetImportError::Csv(err) => write!(f, "invalid score sheet CSV data: {}", err),
            ScoreSheetImportError::InvalidDate { line, value } => write!(
                f,
                "row {}: semester_start '{}' is not a YYYY-MM-DD or DD/MM/YYYY date",
                line, value
            ),
            ScoreSheetImportError::Conflict { line, detail } => {
                write!(f, "row {}: {}", line, detail)
            }
        }
    }
}

impl std::error::Error for ScoreSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoreSheetImportError::Io(err) => Some(err),
            ScoreSheetImportError::Csv(err) => Some(err),
            ScoreSheetImportError::InvalidDate { .. } | ScoreSheetImportError::Conflict { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for ScoreSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScoreSheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Students, semesters and raw grade rows read from a score sheet, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSheet {
    pub students: Vec<StudentProfile>,
    pub semesters: Vec<Semester>,
    pub records: Vec<GradeRecord>,
}

/// Reads instructor score sheets exported as CSV. Scores are not validated here; validation
/// happens when the grading service ingests the records.
pub struct ScoreSheetImporter;

impl ScoreSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ScoreSheet, ScoreSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ScoreSheet, ScoreSheetImportError> {
        let mut sheet = ScoreSheet::default();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            // Header is line 1.
            let line = index + 2;
            apply_row(&mut sheet, row, line)?;
        }

        Ok(sheet)
    }
}

fn apply_row(
    sheet: &mut ScoreSheet,
    row: ScoreSheetRow,
    line: usize,
) -> Result<(), ScoreSheetImportError> {
    let start_date =
        parser::parse_date(&row.semester_start).ok_or_else(|| ScoreSheetImportError::InvalidDate {
            line,
            value: row.semester_start.clone(),
        })?;

    let semester = Semester {
        id: SemesterId(row.semester_id.clone()),
        academic_year: row.academic_year,
        term: row.term,
        start_date,
    };
    match sheet.semesters.iter().find(|known| known.id == semester.id) {
        Some(known) if *known != semester => {
            return Err(ScoreSheetImportError::Conflict {
                line,
                detail: format!(
                    "semester {} redefined with different year, term or start date",
                    semester.id
                ),
            });
        }
        Some(_) => {}
        None => sheet.semesters.push(semester),
    }

    let student_id = StudentId(row.student_id.clone());
    match sheet.students.iter().find(|known| known.id == student_id) {
        Some(known) if known.full_name != row.student_name => {
            return Err(ScoreSheetImportError::Conflict {
                line,
                detail: format!(
                    "student {} listed as both '{}' and '{}'",
                    student_id, known.full_name, row.student_name
                ),
            });
        }
        Some(_) => {}
        None => sheet.students.push(StudentProfile {
            id: student_id.clone(),
            full_name: row.student_name.clone(),
            student_number: row.student_number.clone(),
            grade_level: row.grade_level.clone(),
        }),
    }

    let subject_instance_id = SubjectInstanceId(format!("{}:{}", row.semester_id, row.subject_id));
    if sheet
        .records
        .iter()
        .any(|record| record.student_id == student_id && record.subject.id == subject_instance_id)
    {
        return Err(ScoreSheetImportError::Conflict {
            line,
            detail: format!(
                "student {} already has a grade for {}",
                student_id, subject_instance_id
            ),
        });
    }

    sheet.records.push(GradeRecord {
        student_id,
        subject: SubjectInstanceRef {
            id: subject_instance_id,
            subject_id: SubjectId(row.subject_id),
            subject_code: row.subject_code,
            subject_name: row.subject_name,
            area_code: row.subject_area,
            credits: row.credits,
            semester_id: SemesterId(row.semester_id),
        },
        grading_period_id: row.grading_period.map(GradingPeriodId),
        components: ScoreComponents {
            classwork: row.classwork,
            midterm: row.midterm,
            final_exam: row.final_exam,
            behavior: row.behavior,
        },
        remarks: row.remarks,
    });

    Ok(())
}
