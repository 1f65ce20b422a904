use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Category, SessionId};
use crate::scorer::{ScoreTier, percentage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("a quiz needs at least one question")]
    NoQuestions,

    #[error("score ({score}) exceeds question count ({total})")]
    ScoreOutOfRange { score: u32, total: u32 },
}

/// Results of a completed quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    session_id: SessionId,
    category: Category,
    score: u32,
    total: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Build a summary for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before `started_at`,
    /// `SummaryError::NoQuestions` for an empty quiz and
    /// `SummaryError::ScoreOutOfRange` if `score > total`.
    pub fn new(
        session_id: SessionId,
        category: Category,
        score: u32,
        total: u32,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        if total == 0 {
            return Err(SummaryError::NoQuestions);
        }
        if score > total {
            return Err(SummaryError::ScoreOutOfRange { score, total });
        }

        Ok(Self {
            session_id,
            category,
            score,
            total,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.total)
    }

    #[must_use]
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_percentage(self.percentage())
    }
}
