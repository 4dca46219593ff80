use crate::error::ExportError;
use crate::models::CalculationResult;

pub const EXPORT_HEADERS: [&str; 7] = [
    "Date",
    "Time",
    "CGPA",
    "Letter Grade",
    "Total Credits",
    "Total Grade Points",
    "Semesters",
];

pub fn export_tabular_text(history: &[CalculationResult]) -> Result<String, ExportError> {
    if history.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut buffer = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buffer);
        wtr.write_record(EXPORT_HEADERS)?;

        for entry in history {
            let created_at = entry.created_at();
            wtr.write_record([
                created_at.format("%Y-%m-%d").to_string(),
                created_at.format("%H:%M:%S").to_string(),
                format!("{:.2}", entry.cgpa()),
                entry.letter_grade().to_string(),
                entry.total_credits().to_string(),
                format!("{:.2}", entry.total_grade_points()),
                entry.semester_count().to_string(),
            ])?;
        }
        wtr.flush()?;
    }

    Ok(String::from_utf8(buffer)?)
}
