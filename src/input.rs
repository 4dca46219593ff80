use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::grades::{Grade, GradeScale};
use crate::models::{Semester, Subject};

pub const MIN_SEMESTERS: u32 = 1;
pub const MAX_SEMESTERS: u32 = 12;
pub const MIN_CREDITS: u32 = 1;
pub const MAX_CREDITS: u32 = 10;

pub fn check_semester_count(count: u32) -> Result<u32, ValidationError> {
    if (MIN_SEMESTERS..=MAX_SEMESTERS).contains(&count) {
        Ok(count)
    } else {
        Err(ValidationError::SemesterCount(count))
    }
}

/// Build a subject from form-style text. An empty grade means ungraded.
pub fn parse_subject(
    name: &str,
    credits: &str,
    grade: &str,
) -> Result<Subject, ValidationError> {
    let credits_text = credits.trim();
    let credits = credits_text
        .parse::<u32>()
        .ok()
        .filter(|value| (MIN_CREDITS..=MAX_CREDITS).contains(value))
        .ok_or_else(|| ValidationError::Credits(credits_text.to_string()))?;

    let grade = match grade.trim() {
        "" => None,
        text => Some(text.parse::<Grade>()?),
    };

    Ok(Subject::new(name.trim(), credits, grade))
}

#[derive(Debug, Deserialize)]
struct SubjectRow {
    semester: u32,
    #[serde(default)]
    subject: String,
    credits: String,
    #[serde(default)]
    grade: String,
}

/// Without an explicit count the highest semester in the file decides it.
pub fn load_semesters(
    path: &Path,
    count: Option<u32>,
    scale: GradeScale,
) -> anyhow::Result<Vec<Semester>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_semesters(file, count, scale)
        .with_context(|| format!("failed to read subjects from {}", path.display()))
}

pub fn read_semesters<R: Read>(
    reader: R,
    count: Option<u32>,
    scale: GradeScale,
) -> anyhow::Result<Vec<Semester>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in reader.deserialize::<SubjectRow>().enumerate() {
        // Header is line 1, so data rows start at 2.
        let line = index + 2;
        let row = result.with_context(|| format!("row {line} is malformed"))?;
        let subject = parse_subject(&row.subject, &row.credits, &row.grade)
            .with_context(|| format!("row {line}"))?;
        rows.push((line, row.semester, subject));
    }

    let highest = rows.iter().map(|(_, semester, _)| *semester).max().unwrap_or(0);
    let count = check_semester_count(count.unwrap_or(highest))?;

    let mut semesters: Vec<Vec<Subject>> = vec![Vec::new(); count as usize];
    for (line, semester, subject) in rows {
        if semester < MIN_SEMESTERS || semester > count {
            return Err(ValidationError::SemesterOutOfRange {
                row: line,
                semester,
                count,
            }
            .into());
        }
        semesters[(semester - 1) as usize].push(subject);
    }

    tracing::debug!(semesters = count, "subjects loaded");
    Ok(semesters
        .into_iter()
        .zip(1..)
        .map(|(subjects, id)| Semester::with_subjects(id, subjects, scale))
        .collect())
}
