//! Question sources and the fallback policy around them.

mod fallback;
mod in_memory;
mod open_tdb;
mod provider;

use async_trait::async_trait;

use quiz_core::model::{Category, Difficulty, Question};

use crate::error::SourceError;

pub use fallback::fallback_questions;
pub use in_memory::InMemorySource;
pub use open_tdb::OpenTdbSource;
pub use provider::QuestionProvider;

/// External supplier of quiz questions. May fail at any time.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch exactly `count` questions for `category`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source is unreachable, answers with an error,
    /// or returns malformed or too few questions.
    async fn fetch(
        &self,
        category: &Category,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<Question>, SourceError>;
}
