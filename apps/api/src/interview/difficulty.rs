//! Difficulty ladder and the policy that moves a session along it.
//!
//! The default `KeywordPolicy` is a pure string match. `InterviewService`
//! holds an `Arc<dyn DifficultyPolicy>`, so a real classifier can replace it
//! without touching the orchestrator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lowest rung; every interview starts here.
    pub const LOWEST: Difficulty = Difficulty::Easy;

    /// One step up the ladder, saturating at `Hard`.
    pub fn step_up(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority the candidate is interviewing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Intern,
    Junior,
    Mid,
    Senior,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Intern => "intern",
            Level::Junior => "junior",
            Level::Mid => "mid",
            Level::Senior => "senior",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intern" => Ok(Level::Intern),
            "junior" => Ok(Level::Junior),
            "mid" => Ok(Level::Mid),
            "senior" => Ok(Level::Senior),
            other => Err(AppError::Validation(format!(
                "unknown level '{other}', expected one of intern, junior, mid, senior"
            ))),
        }
    }
}

/// Decides how feedback moves the session along the difficulty ladder.
pub trait DifficultyPolicy: Send + Sync {
    /// True when the feedback judges the answer as weak.
    fn is_negative(&self, feedback: &str) -> bool;

    /// Negative feedback resets to the lowest rung, anything else steps up.
    fn next_difficulty(&self, current: Difficulty, feedback: &str) -> Difficulty {
        if self.is_negative(feedback) {
            Difficulty::LOWEST
        } else {
            current.step_up()
        }
    }
}

/// Default markers that flag an answer as weak.
pub const NEGATIVE_MARKERS: &[&str] = &["incorrect", "wrong", "not correct"];

/// Case-insensitive substring match against a fixed marker list.
#[derive(Debug, Clone)]
pub struct KeywordPolicy {
    markers: Vec<String>,
}

impl KeywordPolicy {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self::new(NEGATIVE_MARKERS)
    }
}

impl DifficultyPolicy for KeywordPolicy {
    fn is_negative(&self, feedback: &str) -> bool {
        let lowered = feedback.to_lowercase();
        self.markers.iter().any(|m| lowered.contains(m.as_str()))
    }
}
