//! Password strength score shown above the requirements checklist.

use std::fmt;

use serde::Serialize;

use crate::validation::PasswordReport;

/// Colour band of the strength bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthBand {
    Weak,
    Medium,
    Strong,
}

impl StrengthBand {
    /// Band for a 0-100 score.
    #[must_use]
    pub const fn for_score(score: u8) -> Self {
        match score {
            0..=49 => Self::Weak,
            50..=79 => Self::Medium,
            _ => Self::Strong,
        }
    }
}

impl fmt::Display for StrengthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Medium => write!(f, "medium"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Heuristic 0-100 password quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StrengthScore(u8);

impl StrengthScore {
    /// Score a password report. Only the five character classes count;
    /// whether the confirmation matches has no effect.
    #[must_use]
    pub fn from_report(report: &PasswordReport) -> Self {
        let classes = report.character_classes();
        let met = classes.iter().filter(|ok| **ok).count();
        let total = classes.len();
        // round(100 * met / total) in integer arithmetic
        let score = (met * 200 + total) / (total * 2);
        Self(u8::try_from(score).unwrap_or(100))
    }

    /// Score a raw password directly.
    #[must_use]
    pub fn of_password(password: &str) -> Self {
        Self::from_report(&PasswordReport::evaluate(password, ""))
    }

    /// The numeric score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Colour band for this score.
    #[must_use]
    pub const fn band(self) -> StrengthBand {
        StrengthBand::for_score(self.0)
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
