use std::env;
use std::str::FromStr;

use quiz_core::model::{QuizSettings, QuizSettingsDraft};

use crate::error::ConfigError;

pub const ENV_QUESTION_COUNT: &str = "QUIZ_QUESTION_COUNT";
pub const ENV_TIME_BUDGET_SECS: &str = "QUIZ_TIME_BUDGET_SECS";
pub const ENV_REVEAL_DELAY_MS: &str = "QUIZ_REVEAL_DELAY_MS";
pub const ENV_DIFFICULTY: &str = "QUIZ_DIFFICULTY";
pub const ENV_API_BASE_URL: &str = "QUIZ_API_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "QUIZ_REQUEST_TIMEOUT_SECS";

/// Read settings from `QUIZ_*` environment variables.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set but cannot be parsed, or the
/// resulting settings fail validation.
pub fn settings_from_env() -> Result<QuizSettings, ConfigError> {
    settings_from_lookup(|key| env::var(key).ok())
}

/// Same as [`settings_from_env`] with a custom variable lookup.
///
/// # Errors
///
/// See [`settings_from_env`].
pub fn settings_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<QuizSettings, ConfigError> {
    let draft = QuizSettingsDraft {
        question_count: parse_var(&lookup, ENV_QUESTION_COUNT)?,
        time_budget_secs: parse_var(&lookup, ENV_TIME_BUDGET_SECS)?,
        reveal_delay_ms: parse_var(&lookup, ENV_REVEAL_DELAY_MS)?,
        difficulty: parse_var(&lookup, ENV_DIFFICULTY)?,
        api_base_url: lookup(ENV_API_BASE_URL),
        request_timeout_secs: parse_var(&lookup, ENV_REQUEST_TIMEOUT_SECS)?,
    };
    Ok(draft.validate()?)
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, SettingsError};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let settings = settings_from_lookup(|_| None).unwrap();
        assert_eq!(settings, QuizSettings::default());
    }

    #[test]
    fn variables_override_defaults() {
        let settings = settings_from_lookup(lookup_from(&[
            (ENV_QUESTION_COUNT, "5"),
            (ENV_TIME_BUDGET_SECS, " 15 "),
            (ENV_REVEAL_DELAY_MS, "0"),
            (ENV_DIFFICULTY, "hard"),
            (ENV_API_BASE_URL, "http://localhost:9000/"),
        ]))
        .unwrap();

        assert_eq!(settings.question_count(), 5);
        assert_eq!(settings.time_budget_secs(), 15);
        assert_eq!(settings.reveal_delay(), Duration::ZERO);
        assert_eq!(settings.difficulty(), Difficulty::Hard);
        assert_eq!(settings.api_base_url(), "http://localhost:9000");
    }

    #[test]
    fn unparsable_value_names_the_variable() {
        let err = settings_from_lookup(lookup_from(&[(ENV_QUESTION_COUNT, "ten")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_QUESTION_COUNT,
                ..
            }
        ));
    }

    #[test]
    fn invalid_settings_are_reported() {
        let err = settings_from_lookup(lookup_from(&[(ENV_TIME_BUDGET_SECS, "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Settings(SettingsError::InvalidTimeBudget)
        ));
    }
}
