use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate;
use crate::error::ValidationError;
use crate::grades::{Grade, GradeScale};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub credits: u32,
    /// `None` while the subject is still ungraded.
    pub grade: Option<Grade>,
}

impl Subject {
    pub fn new(name: impl Into<String>, credits: u32, grade: Option<Grade>) -> Self {
        Self {
            name: name.into(),
            credits,
            grade,
        }
    }

    pub fn graded(name: impl Into<String>, credits: u32, grade: Grade) -> Self {
        Self::new(name, credits, Some(grade))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SemesterGpa {
    pub total_credits: u32,
    pub total_grade_points: f64,
    pub gpa: f64,
    pub valid_subject_count: usize,
}

/// Totals are recomputed on every change to the subject list.
#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    id: u32,
    subjects: Vec<Subject>,
    scale: GradeScale,
    totals: SemesterGpa,
}

impl Semester {
    pub fn new(id: u32, scale: GradeScale) -> Self {
        Self {
            id,
            subjects: Vec::new(),
            scale,
            totals: SemesterGpa::default(),
        }
    }

    pub fn with_subjects(id: u32, subjects: Vec<Subject>, scale: GradeScale) -> Self {
        let mut semester = Self::new(id, scale);
        semester.set_subjects(subjects);
        semester
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn totals(&self) -> SemesterGpa {
        self.totals
    }

    pub fn total_credits(&self) -> u32 {
        self.totals.total_credits
    }

    pub fn total_grade_points(&self) -> f64 {
        self.totals.total_grade_points
    }

    pub fn gpa(&self) -> f64 {
        self.totals.gpa
    }

    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
        self.recompute();
    }

    pub fn remove_subject(&mut self, index: usize) -> Option<Subject> {
        if index >= self.subjects.len() {
            return None;
        }
        let removed = self.subjects.remove(index);
        self.recompute();
        Some(removed)
    }

    pub fn set_subjects(&mut self, subjects: Vec<Subject>) {
        self.subjects = subjects;
        self.recompute();
    }

    pub fn summary(&self) -> SemesterSummary {
        SemesterSummary {
            semester_id: self.id,
            gpa: self.totals.gpa,
            credits: self.totals.total_credits,
        }
    }

    fn recompute(&mut self) {
        self.totals = aggregate::compute_semester_gpa(&self.subjects, &self.scale);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub semester_id: u32,
    pub gpa: f64,
    pub credits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CgpaSummary {
    pub cgpa: f64,
    pub total_credits: u32,
    pub total_grade_points: f64,
    pub letter_grade: Grade,
}

/// One saved calculation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    id: Uuid,
    created_at: NaiveDateTime,
    cgpa: f64,
    total_credits: u32,
    total_grade_points: f64,
    letter_grade: Grade,
    semesters: Vec<SemesterSummary>,
}

impl CalculationResult {
    pub fn from_semesters(
        semesters: &[Semester],
        created_at: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let summary = aggregate::compute_cgpa(semesters)?;
        Ok(Self {
            id: Uuid::new_v4(),
            created_at,
            cgpa: summary.cgpa,
            total_credits: summary.total_credits,
            total_grade_points: summary.total_grade_points,
            letter_grade: summary.letter_grade,
            semesters: semesters.iter().map(Semester::summary).collect(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn cgpa(&self) -> f64 {
        self.cgpa
    }

    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    pub fn total_grade_points(&self) -> f64 {
        self.total_grade_points
    }

    pub fn letter_grade(&self) -> Grade {
        self.letter_grade
    }

    pub fn semesters(&self) -> &[SemesterSummary] {
        &self.semesters
    }

    pub fn semester_count(&self) -> usize {
        self.semesters.len()
    }
}
