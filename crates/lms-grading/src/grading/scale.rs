use serde::{Deserialize, Serialize};

/// Minimum percentage (inclusive) for each non-zero grade point, highest first.
const THRESHOLDS: [(f64, f64); 7] = [
    (80.0, 4.0),
    (75.0, 3.5),
    (70.0, 3.0),
    (65.0, 2.5),
    (60.0, 2.0),
    (55.0, 1.5),
    (50.0, 1.0),
];

/// Every grade point the scale can produce, with its canonical label and Thai descriptor.
const GRADE_POINTS: [(f64, &str, &str); 8] = [
    (4.0, "4", "ดีเยี่ยม"),
    (3.5, "3.5", "ดีมาก"),
    (3.0, "3", "ดี"),
    (2.5, "2.5", "ค่อนข้างดี"),
    (2.0, "2", "น่าพอใจ"),
    (1.5, "1.5", "พอใช้"),
    (1.0, "1", "ผ่านเกณฑ์ขั้นต่ำ"),
    (0.0, "0", "ต่ำกว่าเกณฑ์"),
];

const POINT_TOLERANCE: f64 = 1e-9;

/// How the scale treats input outside its domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Out-of-range percentages clamp and unmapped points fall back to `"0"`.
    #[default]
    Lenient,
    /// Out-of-range percentages and unmapped points are rejected.
    Strict,
}

impl ScaleMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" | "permissive" => Some(Self::Lenient),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("percentage {percentage} is outside 0-100")]
    PercentageOutOfRange { percentage: f64 },
    #[error("percentage is not a number")]
    NotANumber,
    #[error("grade point {point} is not on the grading scale")]
    UnmappedGradePoint { point: f64 },
}

/// Percentage to grade point lookup. Total over all inputs: anything below 50 (including
/// negatives and NaN) maps to 0, anything at or above 80 maps to 4.
pub fn grade_point_for_percentage(percentage: f64) -> f64 {
    THRESHOLDS
        .iter()
        .find(|(minimum, _)| percentage >= *minimum)
        .map(|(_, point)| *point)
        .unwrap_or(0.0)
}

/// Canonical label for a grade point; values off the scale fall back to `"0"`.
pub fn grade_label_for_point(point: f64) -> &'static str {
    scale_entry(point).map(|(_, label, _)| label).unwrap_or("0")
}

/// Thai achievement descriptor printed next to the grade; values off the scale fall back to
/// the failing descriptor.
pub fn thai_descriptor_for_point(point: f64) -> &'static str {
    scale_entry(point)
        .map(|(_, _, descriptor)| descriptor)
        .unwrap_or("ต่ำกว่าเกณฑ์")
}

/// A subject earns its credits with any grade point above zero.
pub fn is_passing(point: f64) -> bool {
    point > 0.0
}

fn scale_entry(point: f64) -> Option<(f64, &'static str, &'static str)> {
    GRADE_POINTS
        .iter()
        .copied()
        .find(|(value, _, _)| (value - point).abs() < POINT_TOLERANCE)
}

/// Grade scale bound to a [`ScaleMode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeScale {
    pub mode: ScaleMode,
}

impl GradeScale {
    pub const fn new(mode: ScaleMode) -> Self {
        Self { mode }
    }

    pub fn point_for_percentage(&self, percentage: f64) -> Result<f64, ScaleError> {
        if percentage.is_nan() {
            return Err(ScaleError::NotANumber);
        }

        match self.mode {
            ScaleMode::Strict if !(0.0..=100.0).contains(&percentage) => {
                Err(ScaleError::PercentageOutOfRange { percentage })
            }
            _ => Ok(grade_point_for_percentage(percentage.clamp(0.0, 100.0))),
        }
    }

    pub fn label_for_point(&self, point: f64) -> Result<&'static str, ScaleError> {
        match (self.mode, scale_entry(point)) {
            (_, Some((_, label, _))) => Ok(label),
            (ScaleMode::Lenient, None) => Ok("0"),
            (ScaleMode::Strict, None) => Err(ScaleError::UnmappedGradePoint { point }),
        }
    }
}
