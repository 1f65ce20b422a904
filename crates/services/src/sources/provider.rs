use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use quiz_core::model::{Category, Difficulty, Question};

use super::{QuestionSource, fallback_questions};

/// Loads a shuffled question set, substituting the built-in fallback set
/// whenever the source fails.
#[derive(Clone)]
pub struct QuestionProvider {
    source: Arc<dyn QuestionSource>,
    difficulty: Difficulty,
    count: usize,
}

impl QuestionProvider {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, difficulty: Difficulty, count: usize) -> Self {
        Self {
            source,
            difficulty,
            count,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Fetch `count` questions for `category`. Never fails: source errors are
    /// logged and replaced with [`fallback_questions`].
    pub async fn load(&self, category: &Category) -> Vec<Question> {
        let mut questions = match self
            .source
            .fetch(category, self.difficulty, self.count)
            .await
        {
            Ok(mut questions) if questions.len() >= self.count => {
                questions.truncate(self.count);
                info!(category = %category, count = questions.len(), "loaded questions from source");
                questions
            }
            Ok(questions) => {
                warn!(
                    category = %category,
                    expected = self.count,
                    actual = questions.len(),
                    "question source returned too few questions; using fallback set"
                );
                fallback_questions(self.count)
            }
            Err(err) => {
                warn!(category = %category, error = %err, "question source unavailable; using fallback set");
                fallback_questions(self.count)
            }
        };

        questions.as_mut_slice().shuffle(&mut rng());
        questions
    }
}

impl std::fmt::Debug for QuestionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionProvider")
            .field("difficulty", &self.difficulty)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}
