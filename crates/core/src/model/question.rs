use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of wrong answers shown next to the correct one.
pub const DISTRACTOR_COUNT: usize = 3;

/// Number of answer buttons displayed for a question.
pub const CHOICE_COUNT: usize = DISTRACTOR_COUNT + 1;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("correct answer cannot be empty")]
    EmptyAnswer,

    #[error("expected 3 distractors, got {actual}")]
    DistractorCount { actual: usize },

    #[error("distractor cannot be empty")]
    EmptyDistractor,

    #[error("correct answer also appears among the distractors")]
    CorrectAmongDistractors,

    #[error("duplicate distractor: {0}")]
    DuplicateDistractor(String),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it arrives from a question source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub prompt: String,
    pub correct_answer: String,
    pub distractors: Vec<String>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new<I, S>(prompt: impl Into<String>, correct_answer: impl Into<String>, distractors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            distractors: distractors.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the draft and turn it into a playable `Question`.
    ///
    /// Text is kept verbatim; answers are compared by exact string match later on,
    /// so no normalization happens here.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if any text is blank, the distractor count is not
    /// `DISTRACTOR_COUNT`, or the correct answer is duplicated among distractors.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }

        let mut seen = HashSet::with_capacity(self.distractors.len());
        for distractor in &self.distractors {
            if distractor.trim().is_empty() {
                return Err(QuestionError::EmptyDistractor);
            }
            if *distractor == self.correct_answer {
                return Err(QuestionError::CorrectAmongDistractors);
            }
            if !seen.insert(distractor.as_str()) {
                return Err(QuestionError::DuplicateDistractor(distractor.clone()));
            }
        }

        let actual = self.distractors.len();
        let distractors: [String; DISTRACTOR_COUNT] = self
            .distractors
            .try_into()
            .map_err(|_| QuestionError::DistractorCount { actual })?;

        Ok(Question {
            prompt: self.prompt,
            correct_answer: self.correct_answer,
            distractors,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    correct_answer: String,
    distractors: [String; DISTRACTOR_COUNT],
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }

    /// All answer choices: distractors first, correct answer last.
    pub fn choices(&self) -> impl Iterator<Item = &str> {
        self.distractors
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.correct_answer.as_str()))
    }

    /// Answer choices in a fresh random order, as shown on every display.
    #[must_use]
    pub fn shuffled_choices<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&str> {
        let mut choices: Vec<&str> = self.choices().collect();
        choices.shuffle(rng);
        choices
    }

    /// Returns true if `candidate` is one of the displayed choices.
    #[must_use]
    pub fn offers(&self, candidate: &str) -> bool {
        self.choices().any(|choice| choice == candidate)
    }
}

impl From<Question> for QuestionDraft {
    fn from(question: Question) -> Self {
        Self {
            prompt: question.prompt,
            correct_answer: question.correct_answer,
            distractors: question.distractors.into(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn arithmetic() -> QuestionDraft {
        QuestionDraft::new("2+2?", "4", ["3", "5", "22"])
    }

    #[test]
    fn validate_accepts_well_formed_question() {
        let question = arithmetic().validate().unwrap();
        assert_eq!(question.prompt(), "2+2?");
        assert_eq!(question.correct_answer(), "4");
        assert_eq!(question.choices().count(), CHOICE_COUNT);
    }

    #[test]
    fn validate_rejects_blank_prompt_and_answer() {
        let mut draft = arithmetic();
        draft.prompt = "   ".into();
        assert_eq!(draft.validate().unwrap_err(), QuestionError::EmptyPrompt);

        let mut draft = arithmetic();
        draft.correct_answer = String::new();
        assert_eq!(draft.validate().unwrap_err(), QuestionError::EmptyAnswer);
    }

    #[test]
    fn validate_rejects_wrong_distractor_count() {
        let draft = QuestionDraft::new("2+2?", "4", ["3", "5"]);
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::DistractorCount { actual: 2 }
        );
    }

    #[test]
    fn validate_rejects_correct_answer_among_distractors() {
        let draft = QuestionDraft::new("2+2?", "4", ["3", "4", "22"]);
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::CorrectAmongDistractors
        );
    }

    #[test]
    fn validate_rejects_duplicate_distractors() {
        let draft = QuestionDraft::new("2+2?", "4", ["3", "3", "22"]);
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::DuplicateDistractor("3".into())
        );
    }

    #[test]
    fn shuffled_choices_keep_every_answer() {
        let question = arithmetic().validate().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = question.shuffled_choices(&mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec!["22", "3", "4", "5"]);
    }

    #[test]
    fn offers_uses_exact_match() {
        let question = arithmetic().validate().unwrap();
        assert!(question.offers("22"));
        assert!(!question.offers(" 4"));
    }
}
