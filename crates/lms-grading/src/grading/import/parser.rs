use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One line of a score sheet export.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreSheetRow {
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) student_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) grade_level: Option<String>,
    pub(crate) semester_id: String,
    pub(crate) academic_year: u16,
    pub(crate) term: u8,
    pub(crate) semester_start: String,
    pub(crate) subject_id: String,
    pub(crate) subject_code: String,
    pub(crate) subject_name: String,
    pub(crate) subject_area: String,
    pub(crate) credits: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) grading_period: Option<String>,
    #[serde(default)]
    pub(crate) classwork: Option<f64>,
    #[serde(default)]
    pub(crate) midterm: Option<f64>,
    #[serde(default, rename = "final")]
    pub(crate) final_exam: Option<f64>,
    #[serde(default)]
    pub(crate) behavior: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) remarks: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ScoreSheetRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<ScoreSheetRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_cells_are_missing_scores() {
        let csv = "student_id,student_name,semester_id,academic_year,term,semester_start,subject_id,subject_code,subject_name,subject_area,credits,classwork,midterm,final,behavior,remarks\n\
                   s-1,Somchai,2567-1,2567,1,2024-05-16,ค21101,ค21101,คณิตศาสตร์ 1,ค,1.5,25,,0,,\n";
        let rows = parse_rows(Cursor::new(csv)).expect("parses");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.classwork, Some(25.0));
        assert_eq!(row.midterm, None);
        assert_eq!(row.final_exam, Some(0.0));
        assert_eq!(row.behavior, None);
        assert_eq!(row.remarks, None);
        assert_eq!(row.grading_period, None);
    }

    #[test]
    fn parse_date_accepts_iso_and_thai_day_first() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 16).expect("valid");
        assert_eq!(parse_date("2024-05-16"), Some(expected));
        assert_eq!(parse_date(" 16/05/2024 "), Some(expected));
        assert_eq!(parse_date("next term"), None);
    }
}
