use quiz_core::model::{Question, QuestionDraft};

const FALLBACK_SET: [(&str, &str, [&str; 3]); 5] = [
    (
        "How many notes are there on a standard grand piano?",
        "88",
        ["78", "108", "98"],
    ),
    (
        "What is the largest planet in our solar system?",
        "Jupiter",
        ["Saturn", "Neptune", "Earth"],
    ),
    (
        "Who wrote the novel '1984'?",
        "George Orwell",
        ["Aldous Huxley", "Ray Bradbury", "H.G. Wells"],
    ),
    (
        "What year did World War II end?",
        "1945",
        ["1944", "1946", "1943"],
    ),
    (
        "Which sport is known as 'The Beautiful Game'?",
        "Football/Soccer",
        ["Basketball", "Tennis", "Baseball"],
    ),
];

/// Built-in questions, repeated in order until `count` is reached.
#[must_use]
pub fn fallback_questions(count: usize) -> Vec<Question> {
    let base: Vec<Question> = FALLBACK_SET
        .iter()
        .filter_map(|(prompt, correct, distractors)| {
            QuestionDraft::new(*prompt, *correct, *distractors)
                .validate()
                .ok()
        })
        .collect();

    base.iter().cycle().take(count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_question_is_valid() {
        assert_eq!(fallback_questions(FALLBACK_SET.len()).len(), FALLBACK_SET.len());
    }

    #[test]
    fn fills_ten_by_repeating_the_set() {
        let questions = fallback_questions(10);
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0], questions[5]);
        assert_eq!(questions[4], questions[9]);
        assert_eq!(questions[1].correct_answer(), "Jupiter");
    }

    #[test]
    fn shorter_request_takes_a_prefix() {
        let questions = fallback_questions(3);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[2].correct_answer(), "George Orwell");
    }
}
