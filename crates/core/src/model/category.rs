use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::ids::CategoryId;

/// A quiz topic backed by a trivia API category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// The categories offered on the home screen.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::new(
                CategoryId::new(9),
                "General Knowledge",
                "Test your knowledge across various topics",
            ),
            Self::new(
                CategoryId::new(17),
                "Science",
                "Explore the wonders of science and nature",
            ),
            Self::new(
                CategoryId::new(23),
                "History",
                "Journey through historical events and figures",
            ),
            Self::new(
                CategoryId::new(21),
                "Sports",
                "Test your sports knowledge and trivia",
            ),
        ]
    }

    /// Look up a catalog entry by its display name (case-insensitive).
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        Self::catalog()
            .into_iter()
            .find(|category| category.name.eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Question difficulty requested from the trivia API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Query-string value understood by the trivia API.
    #[must_use]
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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
