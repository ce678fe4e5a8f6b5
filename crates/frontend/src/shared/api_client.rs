//! Thin JSON client for the survey backend.
//!
//! Every call returns the parsed body or an [`ApiError`]; non-2xx responses
//! are turned into [`ApiError::Status`] with the backend's message when the
//! body carries one.

use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Longest plain-text body still shown to the user as an error message
const MAX_PLAIN_ERROR_LEN: usize = 200;

/// Extracts a user-facing message from an error response body.
///
/// Understands `{"error": "..."}`, `{"message": "..."}` and
/// `{"error": {"message": "..."}}`; short plain-text bodies are used as is.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let message = json
            .get("error")
            .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(|m| m.as_str())))
            .or_else(|| json.get("message").and_then(|m| m.as_str()));
        return message.map(str::to_string);
    }
    if body.len() <= MAX_PLAIN_ERROR_LEN && !body.starts_with('<') {
        return Some(body.to_string());
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Full URL with the query encoded by `serde_qs`; empty queries add nothing
    pub fn url_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> Result<String, ApiError> {
        let qs = serde_qs::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
        if qs.is_empty() {
            Ok(self.url(path))
        } else {
            Ok(format!("{}?{}", self.url(path), qs))
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = send(Request::get(&url), "GET", &url).await?;
        decode(response).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let url = self.url_with_query(path, query)?;
        log::debug!("GET {}", url);
        let response = send(Request::get(&url), "GET", &url).await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let request = Request::post(&url)
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = execute(request, "POST", &url).await?;
        decode(response).await
    }

    /// POST without a body, used by action endpoints such as `/publish`
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let response = send(Request::post(&url), "POST", &url).await?;
        decode(response).await
    }

    /// PUT without a body whose response is not needed, e.g. `/clicked`
    pub async fn put_action(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        log::debug!("PUT {}", url);
        send(Request::put(&url), "PUT", &url).await?;
        Ok(())
    }
}

async fn send(builder: RequestBuilder, method: &str, url: &str) -> Result<Response, ApiError> {
    let request = builder
        .build()
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    execute(request, method, url).await
}

async fn execute(request: Request, method: &str, url: &str) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| {
            log::error!("{} {} failed: {}", method, url, e);
            ApiError::Network(e.to_string())
        })?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message_from_body(&body).unwrap_or_else(|| {
        let text = response.status_text();
        if text.is_empty() {
            "Request failed".to_string()
        } else {
            text
        }
    });
    log::warn!("{} {} -> {}: {}", method, url, status, message);
    Err(ApiError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn use_api() -> ApiClient {
    expect_context::<ApiClient>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::page::{PageQuery, PageSizeQuery};

    #[test]
    fn test_error_message_from_json_bodies() {
        assert_eq!(
            error_message_from_body(r#"{"error":"Survey not found"}"#).as_deref(),
            Some("Survey not found")
        );
        assert_eq!(
            error_message_from_body(r#"{"message":"Title is required"}"#).as_deref(),
            Some("Title is required")
        );
        assert_eq!(
            error_message_from_body(r#"{"error":{"message":"Already published"}}"#).as_deref(),
            Some("Already published")
        );
        assert_eq!(error_message_from_body(r#"{"code":42}"#), None);
    }

    #[test]
    fn test_error_message_from_plain_bodies() {
        assert_eq!(
            error_message_from_body("  Bad Gateway \n").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(error_message_from_body(""), None);
        assert_eq!(error_message_from_body("<html><body>oops</body></html>"), None);
        assert_eq!(error_message_from_body(&"x".repeat(500)), None);
    }

    #[test]
    fn test_error_display_is_user_facing() {
        let err = ApiError::Status {
            status: 422,
            message: "Title is required".to_string(),
        };
        assert_eq!(err.to_string(), "Title is required (HTTP 422)");
        assert_eq!(err.status(), Some(422));
        assert_eq!(ApiError::Network("offline".into()).status(), None);
    }

    #[test]
    fn test_url_with_query() {
        let client = ApiClient::new("http://localhost:5000");
        assert_eq!(
            client
                .url_with_query("/surveys/", &PageQuery::new(2, 10))
                .unwrap(),
            "http://localhost:5000/surveys/?page=2&per_page=10"
        );
        assert_eq!(
            client
                .url_with_query("/responses/survey/abc/responses", &PageSizeQuery::new(1, 10))
                .unwrap(),
            "http://localhost:5000/responses/survey/abc/responses?page=1&page_size=10"
        );
    }

    #[test]
    fn test_url_with_empty_query() {
        let client = ApiClient::new("");
        let empty: std::collections::HashMap<String, String> = Default::default();
        assert_eq!(
            client.url_with_query("/surveys/", &empty).unwrap(),
            "/surveys/"
        );
    }
}
