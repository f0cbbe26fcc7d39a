use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Board size selector. Serialized as the `"3x3"`-style labels used by the
/// history records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    #[serde(rename = "3x3")]
    Easy,
    #[serde(rename = "4x4")]
    Medium,
    #[serde(rename = "5x5")]
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn grid_size(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }

    pub fn n_cells(&self) -> usize {
        self.grid_size() * self.grid_size()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "3x3",
            Difficulty::Medium => "4x4",
            Difficulty::Hard => "5x5",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty {0:?}; expected one of 3x3, 4x4, 5x5")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    /// Accepts `"4x4"`, `"4"` and the variant names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "3x3" | "3" | "easy" => Ok(Difficulty::Easy),
            "4x4" | "4" | "medium" => Ok(Difficulty::Medium),
            "5x5" | "5" | "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
