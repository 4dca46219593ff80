//! CLI integration tests using assert_cmd.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SUBJECTS: &str = "\
semester,subject,credits,grade
1,Mathematics,3,A
1,Physics,4,B
2,Elective,3,
3,Algorithms,5,O
3,Databases,5,B+
";

fn cgpa(data_dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("cgpa").unwrap();
    cmd.env_remove("CGPA_DATA_DIR")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn write_subjects(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("subjects.csv");
    fs::write(&path, content).unwrap();
    path
}

fn save_calculation(dir: &TempDir) -> String {
    let csv = write_subjects(dir.path(), SUBJECTS);
    let output = cgpa(dir.path())
        .arg("calculate")
        .arg("--csv")
        .arg(&csv)
        .arg("--save")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Result saved as "))
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap()
        .to_string()
}

#[test]
fn calculate_prints_semesters_and_cgpa() {
    let dir = TempDir::new().unwrap();
    let csv = write_subjects(dir.path(), SUBJECTS);

    cgpa(dir.path())
        .arg("calculate")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Semester 1: 2 subjects, 7 credits, GPA 6.86 (B+)",
        ))
        .stdout(predicate::str::contains(
            "Semester 2: 0 subjects, 0 credits, GPA 0.00 (F)",
        ))
        .stdout(predicate::str::contains(
            "CGPA 7.82 (A) across 17 credits, 133.00 grade points",
        ))
        .stdout(predicate::str::contains("Result saved").not());
}

#[test]
fn calculate_without_grades_fails() {
    let dir = TempDir::new().unwrap();
    let csv = write_subjects(
        dir.path(),
        "semester,subject,credits,grade\n1,Mathematics,3,\n",
    );

    cgpa(dir.path())
        .arg("calculate")
        .arg("--csv")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "please add at least one subject with grade and credits",
        ));
}

#[test]
fn calculate_rejects_too_many_semesters() {
    let dir = TempDir::new().unwrap();
    let csv = write_subjects(dir.path(), SUBJECTS);

    cgpa(dir.path())
        .arg("calculate")
        .arg("--csv")
        .arg(&csv)
        .arg("--semesters")
        .arg("13")
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid number of semesters (1-12)"));
}

#[test]
fn calculate_writes_report() {
    let dir = TempDir::new().unwrap();
    let csv = write_subjects(dir.path(), SUBJECTS);
    let report = dir.path().join("report.md");

    cgpa(dir.path())
        .arg("calculate")
        .arg("--csv")
        .arg(&csv)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let content = fs::read_to_string(&report).unwrap();
    assert!(content.contains("| Semester 3 | 8.50 | 10 | A+ |"));
}

#[test]
fn saved_results_show_up_in_history() {
    let dir = TempDir::new().unwrap();
    let id = save_calculation(&dir);

    cgpa(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("CGPA 7.82 (A), 3 semester(s), 17 credits"))
        .stdout(predicate::str::contains(id.as_str()));

    cgpa(dir.path())
        .arg("show")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall CGPA: 7.82 (A)"))
        .stdout(predicate::str::contains("- Semester 1: GPA 6.86 (7 credits)"));
}

#[test]
fn export_writes_csv() {
    let dir = TempDir::new().unwrap();
    save_calculation(&dir);
    save_calculation(&dir);
    let out = dir.path().join("history.csv");

    cgpa(dir.path())
        .arg("export")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 calculations"));

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Date,Time,CGPA,Letter Grade,Total Credits,Total Grade Points,Semesters"
    );
    assert!(lines[1].ends_with(",7.82,A,17,133.00,3"));
}

#[test]
fn export_of_empty_history_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("history.csv");

    cgpa(dir.path())
        .arg("export")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No history to export"));

    assert!(!out.exists());
}

#[test]
fn delete_and_clear_history() {
    let dir = TempDir::new().unwrap();
    let first = save_calculation(&dir);
    save_calculation(&dir);

    cgpa(dir.path())
        .arg("delete")
        .arg(&first)
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    cgpa(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains(first.as_str()).not());

    cgpa(dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared."));

    cgpa(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations saved yet."));
}

#[test]
fn unknown_ids_are_not_errors() {
    let dir = TempDir::new().unwrap();
    let missing = "1b4e28ba-2fa1-11d2-883f-0016d3cca427";

    for command in ["show", "delete", "report"] {
        cgpa(dir.path())
            .arg(command)
            .arg(missing)
            .assert()
            .success()
            .stdout(predicate::str::contains("No saved calculation"));
    }
}

#[test]
fn corrupt_history_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cgpaHistory.json"), "{broken").unwrap();

    cgpa(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No calculations saved yet."));
}
