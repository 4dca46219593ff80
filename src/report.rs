use std::fmt::Write;

use crate::grades::classify;
use crate::models::CalculationResult;

pub fn build_report(result: &CalculationResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# CGPA Calculation Report");
    let _ = writeln!(
        output,
        "Generated on {}",
        result.created_at().format("%Y-%m-%d at %H:%M:%S")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Cumulative Grade Point Average");
    let _ = writeln!(output, "- CGPA: {:.2}", result.cgpa());
    let _ = writeln!(output, "- Letter grade: {}", result.letter_grade());
    let _ = writeln!(output, "- Total credits: {}", result.total_credits());
    let _ = writeln!(
        output,
        "- Total grade points: {:.2}",
        result.total_grade_points()
    );
    let _ = writeln!(output, "- Number of semesters: {}", result.semester_count());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Semester-wise Summary");

    if result.semesters().is_empty() {
        let _ = writeln!(output, "No semesters recorded for this calculation.");
    } else {
        let _ = writeln!(output, "| Semester | GPA | Credits | Performance |");
        let _ = writeln!(output, "| --- | --- | --- | --- |");
        for semester in result.semesters() {
            let _ = writeln!(
                output,
                "| Semester {} | {:.2} | {} | {} |",
                semester.semester_id,
                semester.gpa,
                semester.credits,
                classify(semester.gpa)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "_For academic reference only._");

    output
}
