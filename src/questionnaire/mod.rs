// Questionnaire: age brackets and the question bank shown to each bracket

mod bank;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use bank::{questions, Question, PROBLEM_PROMPT};

/// One of the three fixed cohorts that selects the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "12-18")]
    Teen,
    #[serde(rename = "18-25")]
    YoungAdult,
    #[serde(rename = "25+")]
    Adult,
}

impl AgeGroup {
    /// Bracket for an age in whole years.
    pub fn from_age(age: u32) -> Self {
        if age < 18 {
            Self::Teen
        } else if age <= 25 {
            Self::YoungAdult
        } else {
            Self::Adult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teen => "12-18",
            Self::YoungAdult => "18-25",
            Self::Adult => "25+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
