//! Shared HTTP client with the bearer-token and 401 interceptors.

use std::sync::Arc;
use std::time::Duration;

use qms_models::response::Ack;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::session::Session;

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Filler for the `query` / `body` type parameters of [`HttpClient::send`]
/// when the request has none.
pub const NONE: Option<&()> = None;

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl HttpClient {
    /// Build the client for `base_url`, e.g. `http://host:8080/api`.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<Session>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("base URL {base_url:?}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Send one request and return the raw response.
    ///
    /// The bearer header is attached when the session holds a token. A 401
    /// signs the session out and becomes [`ApiError::Unauthorized`]; every
    /// other status is returned untouched.
    pub async fn send<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method.clone(), &url);
        if let Some(header) = self.session.authentication_header() {
            builder = builder.header(AUTHORIZATION, header);
        }
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, path, "Sending request");
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "Request failed");
            ApiError::Transport(e)
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "Request rejected as unauthorized");
            self.session.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    /// Send and decode a successful JSON body into `T`.
    pub async fn request<T, Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, query, body).await?;
        Self::parse_response(response).await
    }

    /// Send a write and return the acknowledgement.
    ///
    /// Only transport and status failures are errors. A 2xx body that is
    /// empty or not JSON still counts as a committed write.
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Ack, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(method.clone(), path, NONE, body).await?;
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Ack::default());
        }
        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(value) => Ok(Ack::from_body(value)),
            Err(e) => {
                tracing::debug!(%method, path, error = %e, "Ignoring non-JSON write response");
                Ok(Ack::default())
            }
        }
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`ApiError::Server`], preferring the
    /// body's `error` field as the message.
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::debug!(status = status.as_u16(), %message, "Request returned an error status");
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// `{"error": "..."}` when present, else the raw body, else the status text.
fn error_message(status: StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Navigator;
    use crate::session::MemoryTokenStore;

    #[test]
    fn error_field_wins() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"error":"name is required"}"#);
        assert_eq!(msg, "name is required");
    }

    #[test]
    fn raw_body_then_status_text() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let session = Arc::new(Session::new(
            Arc::new(MemoryTokenStore::new()),
            Arc::new(Navigator::new()),
        ));
        let result = HttpClient::new("not a url", DEFAULT_TIMEOUT, session);
        assert!(matches!(result, Err(ApiError::InvalidConfig(_))));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let session = Arc::new(Session::new(
            Arc::new(MemoryTokenStore::new()),
            Arc::new(Navigator::new()),
        ));
        let client = HttpClient::new("http://localhost:8080/api/", DEFAULT_TIMEOUT, session).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }
}
