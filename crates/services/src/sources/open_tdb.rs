use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use quiz_core::model::{Category, Difficulty, Question, QuestionDraft, QuizSettings};

use super::QuestionSource;
use crate::error::SourceError;

/// Client for the Open Trivia DB `api.php` endpoint.
///
/// Questions are requested with `encode=url3986` so every text field arrives
/// percent-encoded and decodes without an HTML entity table.
#[derive(Clone, Debug)]
pub struct OpenTdbSource {
    client: Client,
    base_url: String,
}

impl OpenTdbSource {
    /// Build a client for the configured base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be constructed.
    pub fn new(settings: &QuizSettings) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: settings.api_base_url().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api.php", self.base_url)
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(
        &self,
        category: &Category,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<Question>, SourceError> {
        let amount = count.to_string();
        let category_id = category.id().value().to_string();
        debug!(category = %category, %difficulty, count, "requesting trivia questions");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("amount", amount.as_str()),
                ("category", category_id.as_str()),
                ("difficulty", difficulty.as_str()),
                ("type", "multiple"),
                ("encode", "url3986"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body: ApiResponse = response.json().await?;
        parse_response(body, count)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl ApiQuestion {
    fn into_question(self) -> Result<Question, SourceError> {
        let distractors = self
            .incorrect_answers
            .iter()
            .map(|answer| decode(answer))
            .collect::<Result<Vec<_>, _>>()?;
        let draft = QuestionDraft {
            prompt: decode(&self.question)?,
            correct_answer: decode(&self.correct_answer)?,
            distractors,
        };
        Ok(draft.validate()?)
    }
}

fn parse_response(body: ApiResponse, count: usize) -> Result<Vec<Question>, SourceError> {
    if body.response_code != 0 {
        return Err(SourceError::NoResults(body.response_code));
    }
    if body.results.len() < count {
        return Err(SourceError::ShortResponse {
            expected: count,
            actual: body.results.len(),
        });
    }

    body.results
        .into_iter()
        .take(count)
        .map(ApiQuestion::into_question)
        .collect()
}

fn decode(raw: &str) -> Result<String, SourceError> {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .map_err(|err| SourceError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizSettingsDraft;

    fn body(json: &str) -> ApiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_percent_encoded_fields() {
        let parsed = parse_response(
            body(
                r#"{
                    "response_code": 0,
                    "results": [{
                        "category": "Science%3A%20Computers",
                        "type": "multiple",
                        "difficulty": "medium",
                        "question": "What%20is%202%2B2%3F",
                        "correct_answer": "4",
                        "incorrect_answers": ["3", "5", "22"]
                    }]
                }"#,
            ),
            1,
        )
        .unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].prompt(), "What is 2+2?");
        assert_eq!(parsed[0].correct_answer(), "4");
    }

    #[test]
    fn non_zero_response_code_is_an_error() {
        let err = parse_response(body(r#"{"response_code": 1, "results": []}"#), 10).unwrap_err();
        assert!(matches!(err, SourceError::NoResults(1)));
    }

    #[test]
    fn missing_results_is_a_short_response() {
        let err = parse_response(body(r#"{"response_code": 0}"#), 10).unwrap_err();
        assert!(matches!(
            err,
            SourceError::ShortResponse {
                expected: 10,
                actual: 0
            }
        ));
    }

    #[test]
    fn malformed_question_is_rejected() {
        let err = parse_response(
            body(
                r#"{
                    "response_code": 0,
                    "results": [{
                        "question": "Pick%20one",
                        "correct_answer": "A",
                        "incorrect_answers": ["B"]
                    }]
                }"#,
            ),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, SourceError::InvalidQuestion(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        let settings = QuizSettingsDraft {
            api_base_url: Some("http://127.0.0.1:9".into()),
            request_timeout_secs: Some(2),
            ..QuizSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let source = OpenTdbSource::new(&settings).unwrap();
        let category = Category::find("Sports").unwrap();

        let err = source
            .fetch(&category, Difficulty::Medium, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
    }
}
