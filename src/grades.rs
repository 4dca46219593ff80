use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Letter grade, used both for a subject's grade and for classifying a GPA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "O")]
    O,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub const ALL: [Grade; 7] = [
        Grade::O,
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::C,
        Grade::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownGrade(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeScale {
    entries: &'static [(Grade, f64)],
}

/// The ten-point scale used everywhere unless a caller supplies its own.
pub const STANDARD_SCALE: GradeScale = GradeScale::new(&[
    (Grade::O, 10.0),
    (Grade::APlus, 9.0),
    (Grade::A, 8.0),
    (Grade::BPlus, 7.0),
    (Grade::B, 6.0),
    (Grade::C, 5.0),
    (Grade::F, 0.0),
]);

impl GradeScale {
    pub const fn new(entries: &'static [(Grade, f64)]) -> Self {
        Self { entries }
    }

    pub fn points(&self, grade: Grade) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == grade)
            .map(|(_, points)| *points)
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        STANDARD_SCALE
    }
}

/// Map a GPA or CGPA to its letter grade. Lower bounds are inclusive.
pub fn classify(score: f64) -> Grade {
    match score {
        s if s >= 9.5 => Grade::O,
        s if s >= 8.5 => Grade::APlus,
        s if s >= 7.5 => Grade::A,
        s if s >= 6.5 => Grade::BPlus,
        s if s >= 5.5 => Grade::B,
        s if s >= 4.0 => Grade::C,
        _ => Grade::F,
    }
}
