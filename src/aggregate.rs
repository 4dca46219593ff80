use crate::error::ValidationError;
use crate::grades::{classify, GradeScale};
use crate::models::{CgpaSummary, Semester, SemesterGpa, Subject};

/// Subjects without a grade, with a grade the scale does not rate, or with
/// zero credits are skipped.
pub fn compute_semester_gpa(subjects: &[Subject], scale: &GradeScale) -> SemesterGpa {
    let mut totals = SemesterGpa::default();

    for subject in subjects {
        if subject.credits == 0 {
            continue;
        }
        let Some(points) = subject.grade.and_then(|grade| scale.points(grade)) else {
            continue;
        };

        totals.total_credits = totals.total_credits.saturating_add(subject.credits);
        totals.total_grade_points += points * subject.credits as f64;
        totals.valid_subject_count += 1;
    }

    totals.gpa = weighted_mean(totals.total_grade_points, totals.total_credits);
    totals
}

pub fn compute_cgpa(semesters: &[Semester]) -> Result<CgpaSummary, ValidationError> {
    let mut total_credits = 0u32;
    let mut total_grade_points = 0.0;

    for semester in semesters {
        if semester.total_credits() == 0 {
            tracing::debug!(semester = semester.id(), "no graded subjects, skipping");
            continue;
        }
        total_credits = total_credits.saturating_add(semester.total_credits());
        total_grade_points += semester.total_grade_points();
    }

    if total_credits == 0 {
        return Err(ValidationError::NoGradedSubjects);
    }

    let cgpa = weighted_mean(total_grade_points, total_credits);
    Ok(CgpaSummary {
        cgpa,
        total_credits,
        total_grade_points,
        letter_grade: classify(cgpa),
    })
}

fn weighted_mean(points: f64, credits: u32) -> f64 {
    if credits == 0 {
        0.0
    } else {
        points / credits as f64
    }
}
