use crate::infra::{grading_service, AppGradingService, InMemoryGradeRepository};
use clap::Args;
use lms_grading::config::AppConfig;
use lms_grading::error::AppError;
use lms_grading::grading::report::{SubjectAreaSection, SubjectLine};
use lms_grading::grading::{
    ReportCardData, ScoreSheetImporter, SemesterId, StudentId, StudentProfile, TranscriptData,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct TranscriptArgs {
    /// Score sheet CSV holding every semester for the student
    #[arg(long)]
    pub(crate) score_sheet: PathBuf,
    /// Student identifier as written in the score sheet
    #[arg(long)]
    pub(crate) student: String,
    /// Print the transcript as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportCardArgs {
    /// Score sheet CSV holding the semester's grades
    #[arg(long)]
    pub(crate) score_sheet: PathBuf,
    /// Student identifier as written in the score sheet
    #[arg(long)]
    pub(crate) student: String,
    /// Semester identifier, e.g. 2567-1
    #[arg(long)]
    pub(crate) semester: String,
    /// Print the report card as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_transcript(args: TranscriptArgs) -> Result<(), AppError> {
    let service = load_service(&args.score_sheet)?;
    let transcript = service.transcript(&StudentId(args.student))?;

    if args.json {
        print_json(&transcript)
    } else {
        render_transcript(&transcript);
        Ok(())
    }
}

pub(crate) fn run_report_card(args: ReportCardArgs) -> Result<(), AppError> {
    let service = load_service(&args.score_sheet)?;
    let card = service.report_card(&StudentId(args.student), &SemesterId(args.semester))?;

    if args.json {
        print_json(&card)
    } else {
        render_report_card(&card);
        Ok(())
    }
}

fn load_service(path: &Path) -> Result<AppGradingService, AppError> {
    let config = AppConfig::load()?;
    let sheet = ScoreSheetImporter::from_path(path)?;
    Ok(grading_service(
        InMemoryGradeRepository::from_sheet(sheet),
        &config.grading,
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

fn render_student(student: &StudentProfile) {
    println!("Student: {} [{}]", student.full_name, student.id);
    if let Some(number) = &student.student_number {
        println!("Student number: {}", number);
    }
    if let Some(level) = &student.grade_level {
        println!("Grade level: {}", level);
    }
}

fn render_sections(sections: &[SubjectAreaSection]) {
    for section in sections {
        println!("  {} ({})", section.area_name, section.area_code);
        for line in &section.subjects {
            println!("    {}", format_subject_line(line));
        }
    }
}

pub(crate) fn format_subject_line(line: &SubjectLine) -> String {
    let result = match (line.percentage, line.grade_label, line.descriptor) {
        (Some(percentage), Some(label), Some(descriptor)) => {
            format!("{:>6.2}%  grade {:<3}  {}", percentage, label, descriptor)
        }
        _ => "ungraded".to_string(),
    };

    let mut rendered = format!(
        "{:<8} {:<28} {:>4.1} cr  {}",
        line.subject_code, line.subject_name, line.credits, result
    );
    if let Some(remarks) = &line.remarks {
        rendered.push_str(&format!("  ({})", remarks));
    }
    rendered
}

fn render_report_card(card: &ReportCardData) {
    println!("Report card, semester {}", card.semester_label);
    render_student(&card.student);

    println!("\nSubjects");
    render_sections(&card.subject_areas);

    println!(
        "\nGPA {:.2} | credits {:.1} | earned {:.1}",
        card.gpa.gpa, card.gpa.total_credits, card.gpa.earned_credits
    );

    match &card.attendance {
        Some(attendance) => {
            let rate = attendance
                .attendance_rate()
                .map(|rate| format!("{:.1}%", rate))
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "Attendance: {} of {} days ({}), absent {}, late {}, leave {}",
                attendance.present,
                attendance.school_days,
                rate,
                attendance.absent,
                attendance.late,
                attendance.leave
            );
        }
        None => println!("Attendance: not recorded"),
    }

    if let Some(behavior) = &card.behavior {
        for (label, value) in [
            ("Desired characteristics", &behavior.desired_characteristics),
            ("Reading, thinking and writing", &behavior.reading_thinking_writing),
            ("Learner development activities", &behavior.learner_activities),
        ] {
            if let Some(value) = value {
                println!("{}: {}", label, value);
            }
        }
    }
}

fn render_transcript(transcript: &TranscriptData) {
    println!("Academic transcript");
    render_student(&transcript.student);

    if transcript.semesters.is_empty() {
        println!("\nNo graded semesters on record");
    }
    for semester in &transcript.semesters {
        println!(
            "\nSemester {}  GPA {:.2}  credits {:.1}",
            semester.gpa.semester_label,
            semester.gpa.gpa(),
            semester.gpa.total_credits()
        );
        render_sections(&semester.subject_areas);
    }

    if !transcript.learning_areas.is_empty() {
        println!("\nLearning areas");
        for area in &transcript.learning_areas {
            println!(
                "  {:<32} credits {:>4.1}  earned {:>4.1}  GPA {:.2}",
                format!("{} ({})", area.area_name, area.area_code),
                area.summary.total_credits,
                area.summary.earned_credits,
                area.summary.gpa
            );
        }
    }

    println!(
        "\nGPAX {:.2} | credits {:.1} | earned {:.1}",
        transcript.gpax, transcript.total_credits, transcript.earned_credits
    );
}
