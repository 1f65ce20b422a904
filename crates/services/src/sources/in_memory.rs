use async_trait::async_trait;

use quiz_core::model::{Category, Difficulty, Question};

use super::QuestionSource;
use crate::error::SourceError;

/// Fixed question list, ignoring category and difficulty. Useful for tests and
/// offline play.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    questions: Vec<Question>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    async fn fetch(
        &self,
        _category: &Category,
        _difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<Question>, SourceError> {
        if self.questions.len() < count {
            return Err(SourceError::ShortResponse {
                expected: count,
                actual: self.questions.len(),
            });
        }
        Ok(self.questions.iter().take(count).cloned().collect())
    }
}
