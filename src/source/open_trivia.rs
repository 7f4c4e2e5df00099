use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::Question;

use super::{QuestionQuery, QuestionSource, SourceError};

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

/// Open Trivia DB client.
#[derive(Clone)]
pub struct OpenTriviaSource {
    client: Client,
    api_url: String,
}

impl OpenTriviaSource {
    /// Build a client for `api_url` whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Transport` if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl QuestionSource for OpenTriviaSource {
    async fn fetch(&self, query: &QuestionQuery) -> Result<Vec<Question>, SourceError> {
        debug!(url = %self.api_url, ?query, "requesting questions");

        let response = self
            .client
            .get(&self.api_url)
            .query(&query.to_pairs())
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "question request rejected");
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        let body: ProviderResponse =
            serde_json::from_slice(&body).map_err(SourceError::Malformed)?;

        if body.response_code != 0 {
            warn!(code = body.response_code, "provider reported failure");
            return Err(SourceError::ResponseCode(body.response_code));
        }

        let expected = query.amount as usize;
        if body.results.len() != expected {
            return Err(SourceError::CountMismatch {
                expected,
                actual: body.results.len(),
            });
        }

        debug!(count = body.results.len(), "questions received");
        Ok(body.results)
    }
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    response_code: i64,
    results: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;
    use crate::models::QuestionKind;

    fn record(index: usize) -> String {
        format!(
            r#"{{"type":"multiple","difficulty":"hard","category":"Science: Computers",
                "question":"Prompt {index}","correct_answer":"yes {index}",
                "incorrect_answers":["no a","no b","no c"]}}"#
        )
    }

    fn body(code: i64, count: usize) -> String {
        let results: Vec<String> = (0..count).map(record).collect();
        format!(
            r#"{{"response_code":{code},"results":[{}]}}"#,
            results.join(",")
        )
    }

    async fn source_for(server: &mockito::ServerGuard) -> OpenTriviaSource {
        OpenTriviaSource::new(format!("{}/api.php", server.url()), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_default_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("amount".into(), "5".into()),
                Matcher::UrlEncoded("category".into(), "18".into()),
                Matcher::UrlEncoded("type".into(), "multiple".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body(0, 5))
            .create_async()
            .await;

        let source = source_for(&server).await;
        let questions = source.fetch(&QuestionQuery::default()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[2].correct_answer, "yes 2");
    }

    #[tokio::test]
    async fn test_fetch_honours_overrides() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("amount".into(), "2".into()),
                Matcher::UrlEncoded("category".into(), "9".into()),
                Matcher::UrlEncoded("type".into(), "boolean".into()),
            ]))
            .with_status(200)
            .with_body(body(0, 2))
            .create_async()
            .await;

        let source = source_for(&server).await;
        let query = QuestionQuery {
            amount: 2,
            category: 9,
            kind: QuestionKind::Boolean,
        };
        let questions = source.fetch(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(questions.len(), 2);
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error":"Internal server error"}"#)
            .create_async()
            .await;

        let err = source_for(&server)
            .await
            .fetch(&QuestionQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::HttpStatus(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_provider_response_code_fails() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body(1, 0))
            .create_async()
            .await;

        let err = source_for(&server)
            .await
            .fetch(&QuestionQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::ResponseCode(1)));
    }

    #[tokio::test]
    async fn test_malformed_results_fail() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"response_code":0,"results":"nope"}"#)
            .create_async()
            .await;

        let err = source_for(&server)
            .await
            .fetch(&QuestionQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_short_result_list_fails() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body(0, 3))
            .create_async()
            .await;

        let err = source_for(&server)
            .await
            .fetch(&QuestionQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SourceError::CountMismatch {
                expected: 5,
                actual: 3
            }
        ));
    }
}
