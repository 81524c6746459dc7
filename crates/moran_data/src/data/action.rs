use serde::{Deserialize, Serialize};
use std::fmt;

/// A single move in a two-player repeated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "C")]
    Cooperate,
    #[serde(rename = "D")]
    Defect,
}

impl Action {
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Action::Cooperate => Action::Defect,
            Action::Defect => Action::Cooperate,
        }
    }

    /// Parses the single-letter form used in cycle strings (`C` / `D`).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' | 'c' => Some(Action::Cooperate),
            'D' | 'd' => Some(Action::Defect),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Action::Cooperate => 'C',
            Action::Defect => 'D',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
