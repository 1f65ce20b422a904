use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{Category, Question, QuizSummary, SessionId};
use quiz_core::scorer::{self, ScoreOutcome};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── RESOLUTION ────────────────────────────────────────────────────────────────
//

/// How a question was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionCause {
    Selected,
    Expired,
}

/// Outcome of closing the current question, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub index: usize,
    pub cause: ResolutionCause,
    pub selected: Option<String>,
    pub correct_answer: String,
    pub outcome: ScoreOutcome,
}

/// What `current()` sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentQuestion<'a> {
    Active { index: usize, question: &'a Question },
    Complete { score: u32 },
}

/// Result of `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next { index: usize },
    Complete { score: u32, total: usize },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a fixed, pre-shuffled question set.
///
/// The `answered` flag guards the current question: the first resolution wins and
/// every later one (a second click, a timer expiry racing a click) is rejected with
/// `SessionError::AlreadyAnswered`, leaving the score untouched.
pub struct QuizSession {
    id: SessionId,
    category: Category,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    answered: bool,
    last_resolution: Option<Resolution>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over `questions`, which must already be shuffled.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionSet` if no questions are provided.
    pub fn start(
        category: Category,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        Ok(Self {
            id: SessionId::new_random(),
            category,
            questions,
            current: 0,
            score: 0,
            answered: false,
            last_resolution: None,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
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
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Resolution of the most recently closed question.
    #[must_use]
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    #[must_use]
    pub fn current(&self) -> CurrentQuestion<'_> {
        match self.questions.get(self.current) {
            Some(question) => CurrentQuestion::Active {
                index: self.current,
                question,
            },
            None => CurrentQuestion::Complete { score: self.score },
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let resolved = self.current + usize::from(self.answered && !self.is_complete());
        SessionProgress {
            total: self.questions.len(),
            resolved,
            remaining: self.questions.len().saturating_sub(resolved),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Close the current question with `selected`, or `None` when time ran out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyAnswered` if the current question was already
    /// resolved, or `SessionError::Completed` once every question is done.
    pub fn resolve(&mut self, selected: Option<&str>) -> Result<&Resolution, SessionError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::Completed);
        };
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }

        let outcome = scorer::score(selected, question.correct_answer());
        let resolution = Resolution {
            index: self.current,
            cause: if selected.is_some() {
                ResolutionCause::Selected
            } else {
                ResolutionCause::Expired
            },
            selected: selected.map(str::to_owned),
            correct_answer: question.correct_answer().to_owned(),
            outcome,
        };

        self.score += outcome.delta;
        self.answered = true;
        Ok(&*self.last_resolution.insert(resolution))
    }

    /// Move past a resolved question. `at` becomes the completion time when the
    /// last question is passed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` if the current question is still open,
    /// or `SessionError::Completed` if the session already finished.
    pub fn advance(&mut self, at: DateTime<Utc>) -> Result<Step, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if !self.answered {
            return Err(SessionError::NotAnswered);
        }

        self.current += 1;
        self.answered = false;

        if self.is_complete() {
            self.completed_at = Some(at.max(self.started_at));
            return Ok(Step::Complete {
                score: self.score,
                total: self.questions.len(),
            });
        }
        Ok(Step::Next {
            index: self.current,
        })
    }

    /// Final results.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` while questions remain, or
    /// `SessionError::Summary` if the totals do not form a valid summary.
    pub fn summary(&self) -> Result<QuizSummary, SessionError> {
        let Some(completed_at) = self.completed_at else {
            return Err(SessionError::NotAnswered);
        };
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Ok(QuizSummary::new(
            self.id,
            self.category.clone(),
            self.score,
            total,
            self.started_at,
            completed_at,
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("category", &self.category.name())
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("answered", &self.answered)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
