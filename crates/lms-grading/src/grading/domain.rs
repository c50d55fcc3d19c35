use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for enrolled students.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for academic semesters (e.g. `2567-1`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemesterId(pub String);

/// Identifier wrapper for a catalog subject, independent of when it is taught.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

/// Identifier wrapper for a subject offered in a specific semester.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectInstanceId(pub String);

/// Identifier wrapper for a sub-division of a semester such as a midterm window.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GradingPeriodId(pub String);

macro_rules! display_id {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })*
    };
}

display_id!(StudentId, SemesterId, SubjectId, SubjectInstanceId, GradingPeriodId);

/// Student header printed on report cards and transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: StudentId,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
}

/// Academic semester. Thai schools number terms within a Buddhist-era academic year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: SemesterId,
    pub academic_year: u16,
    pub term: u8,
    pub start_date: NaiveDate,
}

impl Semester {
    /// Display form used on Thai documents, e.g. `1/2567`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.term, self.academic_year)
    }

    pub(crate) fn chronological_key(&self) -> (NaiveDate, &SemesterId) {
        (self.start_date, &self.id)
    }
}

/// Learning area (กลุ่มสาระการเรียนรู้) used to group subjects on printed documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectArea {
    pub code: String,
    pub name: String,
}

impl SubjectArea {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// The eight core learning areas of the Thai basic education curriculum, in the order
    /// they are printed on official documents.
    pub fn standard() -> Vec<Self> {
        vec![
            Self::new("ท", "ภาษาไทย"),
            Self::new("ค", "คณิตศาสตร์"),
            Self::new("ว", "วิทยาศาสตร์และเทคโนโลยี"),
            Self::new("ส", "สังคมศึกษา ศาสนา และวัฒนธรรม"),
            Self::new("พ", "สุขศึกษาและพลศึกษา"),
            Self::new("ศ", "ศิลปะ"),
            Self::new("ง", "การงานอาชีพ"),
            Self::new("อ", "ภาษาต่างประเทศ"),
        ]
    }
}

/// A subject offered in one semester; `credits` is the GPA weighting unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInstanceRef {
    pub id: SubjectInstanceId,
    pub subject_id: SubjectId,
    pub subject_code: String,
    pub subject_name: String,
    pub area_code: String,
    pub credits: f64,
    pub semester_id: SemesterId,
}

/// One scored part of a subject's assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    Classwork,
    Midterm,
    FinalExam,
    Behavior,
}

impl ScoreComponent {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Classwork,
            Self::Midterm,
            Self::FinalExam,
            Self::Behavior,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Classwork => "classwork",
            Self::Midterm => "midterm",
            Self::FinalExam => "final",
            Self::Behavior => "behavior",
        }
    }
}

impl fmt::Display for ScoreComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw component scores as entered by the subject instructor. `None` means "not yet entered", never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classwork: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midterm: Option<f64>,
    #[serde(default, rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_exam: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<f64>,
}

impl ScoreComponents {
    pub fn get(&self, component: ScoreComponent) -> Option<f64> {
        match component {
            ScoreComponent::Classwork => self.classwork,
            ScoreComponent::Midterm => self.midterm,
            ScoreComponent::FinalExam => self.final_exam,
            ScoreComponent::Behavior => self.behavior,
        }
    }

    /// Present components in canonical order.
    pub fn entered(&self) -> impl Iterator<Item = (ScoreComponent, f64)> + '_ {
        ScoreComponent::ordered()
            .into_iter()
            .filter_map(|component| self.get(component).map(|score| (component, score)))
    }

    pub fn is_empty(&self) -> bool {
        self.entered().next().is_none()
    }
}

/// Raw grade row as supplied by the data-access layer, before validation and derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub student_id: StudentId,
    pub subject: SubjectInstanceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading_period_id: Option<GradingPeriodId>,
    #[serde(default)]
    pub components: ScoreComponents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
