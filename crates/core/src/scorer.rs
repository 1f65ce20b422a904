//! Answer scoring and end-of-quiz performance tiers.

use std::fmt;

/// Result of scoring a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub is_correct: bool,
    /// Points added to the session score: 0 or 1.
    pub delta: u32,
}

/// Score a resolution.
///
/// `selected` is `None` when the countdown expired without a pick, which is
/// always incorrect. Answers match by exact string equality.
#[must_use]
pub fn score(selected: Option<&str>, correct: &str) -> ScoreOutcome {
    let is_correct = selected.is_some_and(|answer| answer == correct);
    ScoreOutcome {
        is_correct,
        delta: u32::from(is_correct),
    }
}

/// Percentage of correct answers, in `[0, 100]`.
///
/// Returns 0 for an empty quiz.
#[must_use]
pub fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score.min(total)) * 100.0 / f64::from(total)
}

/// Performance band used to pick the end-of-quiz message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    /// 90% and above.
    Excellent,
    /// 70% and above.
    Great,
    /// 50% and above.
    Good,
    Encouragement,
}

impl ScoreTier {
    #[must_use]
    pub fn from_percentage(percent: f64) -> Self {
        if percent >= 90.0 {
            Self::Excellent
        } else if percent >= 70.0 {
            Self::Great
        } else if percent >= 50.0 {
            Self::Good
        } else {
            Self::Encouragement
        }
    }

    #[must_use]
    pub fn for_score(score: u32, total: u32) -> Self {
        Self::from_percentage(percentage(score, total))
    }

    /// Default wording; front-ends are free to override it.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent! You're a quiz master!",
            ScoreTier::Great => "Great job! Well done!",
            ScoreTier::Good => "Good effort! Keep learning!",
            ScoreTier::Encouragement => "Don't give up! Try again!",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
