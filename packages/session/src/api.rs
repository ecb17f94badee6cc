use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Word;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct CreateWordBody<'a> {
    italian_word: &'a str,
    english_word: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the words API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_words(&self) -> Result<Vec<Word>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/words", self.base_url))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn create_word(&self, italian: &str, english: &str) -> Result<Word, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/words", self.base_url))
            .json(&CreateWordBody {
                italian_word: italian,
                english_word: english,
            })
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Maps a non-2xx response to [`ClientError::Api`], keeping the server's
    /// `{"message": ...}` text when it parses.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| "request failed".to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_default_base_url() {
        let client = ApiClient::default();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }
}
