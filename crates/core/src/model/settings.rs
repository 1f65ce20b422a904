use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::model::Difficulty;

pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_TIME_BUDGET_SECS: u32 = 30;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 2_000;
pub const DEFAULT_API_BASE_URL: &str = "https://opentdb.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// The trivia API refuses larger batches.
pub const MAX_QUESTION_COUNT: u32 = 50;

/// Validated engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    question_count: u32,
    time_budget_secs: u32,
    reveal_delay_ms: u64,
    difficulty: Difficulty,
    api_base_url: String,
    request_timeout_secs: u64,
}

/// Partially specified settings; unset fields take the defaults.
#[derive(Clone, Debug, Default)]
pub struct QuizSettingsDraft {
    pub question_count: Option<u32>,
    pub time_budget_secs: Option<u32>,
    pub reveal_delay_ms: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be between 1 and 50, got {0}")]
    InvalidQuestionCount(u32),
    #[error("time budget must be > 0 seconds")]
    InvalidTimeBudget,
    #[error("request timeout must be > 0 seconds")]
    InvalidRequestTimeout,
    #[error("invalid base URL")]
    InvalidBaseUrl,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a count or timeout is out of range or the base URL
    /// does not parse.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let question_count = self.question_count.unwrap_or(DEFAULT_QUESTION_COUNT);
        if question_count == 0 || question_count > MAX_QUESTION_COUNT {
            return Err(SettingsError::InvalidQuestionCount(question_count));
        }

        let time_budget_secs = self.time_budget_secs.unwrap_or(DEFAULT_TIME_BUDGET_SECS);
        if time_budget_secs == 0 {
            return Err(SettingsError::InvalidTimeBudget);
        }

        let request_timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if request_timeout_secs == 0 {
            return Err(SettingsError::InvalidRequestTimeout);
        }

        let api_base_url = normalize_optional(self.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if Url::parse(&api_base_url).is_err() {
            return Err(SettingsError::InvalidBaseUrl);
        }

        Ok(QuizSettings {
            question_count,
            time_budget_secs,
            reveal_delay_ms: self.reveal_delay_ms.unwrap_or(DEFAULT_REVEAL_DELAY_MS),
            difficulty: self.difficulty.unwrap_or_default(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout_secs,
        })
    }
}

impl QuizSettings {
    /// Questions per session.
    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    /// Countdown length for each question.
    #[must_use]
    pub fn time_budget_secs(&self) -> u32 {
        self.time_budget_secs
    }

    /// Pause between a resolution and the next question.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            difficulty: Difficulty::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
