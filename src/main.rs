use std::path::PathBuf;
use std::process;

use anyhow::Context;
use cgpa_tracker::config::Config;
use cgpa_tracker::{
    classify, export, input, report, CalculationResult, ExportError, FileStorage, HistoryStore,
    STANDARD_SCALE,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "cgpa", version)]
#[command(about = "Semester GPA and CGPA calculator with saved history", long_about = None)]
struct Cli {
    /// Directory holding saved history (defaults to $CGPA_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate GPA per semester and overall CGPA from a CSV of subjects
    Calculate {
        /// CSV with columns semester,subject,credits,grade
        #[arg(long)]
        csv: PathBuf,
        /// Number of semesters (1-12); defaults to the highest semester in the file
        #[arg(long)]
        semesters: Option<u32>,
        /// Save the result to history
        #[arg(long)]
        save: bool,
        /// Also write a markdown report to this file
        #[arg(long = "report")]
        report_path: Option<PathBuf>,
    },
    /// List saved calculations, most recent first
    History,
    /// Show the semester breakdown of a saved calculation
    Show { id: Uuid },
    /// Delete a saved calculation
    Delete { id: Uuid },
    /// Delete all saved calculations
    Clear,
    /// Export saved calculations as CSV
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a markdown report for a saved calculation
    Report {
        id: Uuid,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cgpa_tracker=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::resolve(cli.data_dir);
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");
    let mut history = HistoryStore::open_with_key(
        FileStorage::new(&config.data_dir),
        config.history_key.clone(),
    );

    match cli.command {
        Commands::Calculate {
            csv,
            semesters,
            save,
            report_path,
        } => {
            let semesters = input::load_semesters(&csv, semesters, STANDARD_SCALE)?;

            for semester in &semesters {
                let totals = semester.totals();
                println!(
                    "Semester {}: {} subjects, {} credits, GPA {:.2} ({})",
                    semester.id(),
                    totals.valid_subject_count,
                    totals.total_credits,
                    totals.gpa,
                    classify(totals.gpa)
                );
            }

            let result = CalculationResult::from_semesters(&semesters, Local::now().naive_local())?;
            println!(
                "CGPA {:.2} ({}) across {} credits, {:.2} grade points",
                result.cgpa(),
                result.letter_grade(),
                result.total_credits(),
                result.total_grade_points()
            );

            if let Some(out) = report_path {
                std::fs::write(&out, report::build_report(&result))
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Report written to {}.", out.display());
            }

            if save {
                let id = result.id();
                history.append(result).context("failed to save result")?;
                println!("Result saved as {id}.");
            }
        }
        Commands::History => {
            if history.is_empty() {
                println!("No calculations saved yet.");
                return Ok(());
            }

            for entry in history.list() {
                println!(
                    "- {} CGPA {:.2} ({}), {} semester(s), {} credits [{}]",
                    entry.created_at().format("%Y-%m-%d at %H:%M:%S"),
                    entry.cgpa(),
                    entry.letter_grade(),
                    entry.semester_count(),
                    entry.total_credits(),
                    entry.id()
                );
            }
        }
        Commands::Show { id } => {
            let Some(entry) = history.find_by_id(id) else {
                println!("No saved calculation with id {id}.");
                return Ok(());
            };

            println!(
                "Date: {}",
                entry.created_at().format("%Y-%m-%d at %H:%M:%S")
            );
            println!("Overall CGPA: {:.2} ({})", entry.cgpa(), entry.letter_grade());
            println!("Total credits: {}", entry.total_credits());
            println!("Total grade points: {:.2}", entry.total_grade_points());
            println!("Semester-wise breakdown:");
            for semester in entry.semesters() {
                println!(
                    "- Semester {}: GPA {:.2} ({} credits)",
                    semester.semester_id, semester.gpa, semester.credits
                );
            }
        }
        Commands::Delete { id } => match history.delete_by_id(id)? {
            Some(_) => println!("Calculation {id} deleted."),
            None => println!("No saved calculation with id {id}."),
        },
        Commands::Clear => {
            history.clear()?;
            println!("History cleared.");
        }
        Commands::Export { out } => {
            let text = match export::export_tabular_text(history.list()) {
                Ok(text) => text,
                Err(ExportError::NothingToExport) => {
                    println!("No history to export.");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };

            let out = out.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "cgpa_history_{}.csv",
                    Local::now().format("%Y-%m-%d")
                ))
            });
            std::fs::write(&out, text)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Exported {} calculations to {}.", history.len(), out.display());
        }
        Commands::Report { id, out } => {
            let Some(entry) = history.find_by_id(id) else {
                println!("No saved calculation with id {id}.");
                return Ok(());
            };
            std::fs::write(&out, report::build_report(entry))
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
