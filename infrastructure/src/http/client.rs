//! HTTP client for the session and auth endpoints

use super::wire::{
    AuthResponse, CheckAuthResponse, HistoryEntry, HistoryResponse, LoginRequest,
    SendMessageRequest, SendMessageResponse, SessionCreated, SignupRequest, auth_error_reason,
    bot_reply_from, session_error_reason,
};
use async_trait::async_trait;
use botchat_application::{AuthBackend, BackendError, ChatBackend};
use botchat_domain::{
    AuthToken, Identity, LoginForm, Message, SessionId, SignupForm, StoredCredentials,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Which fallback reason a failed response maps to
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Session,
    Auth,
}

/// Client for the chatbot's session and auth API
///
/// Implements [`ChatBackend`] and [`AuthBackend`] over one shared
/// `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Use an existing `reqwest::Client`
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(request: RequestBuilder, token: Option<&AuthToken>) -> RequestBuilder {
        match token {
            Some(token) => request.header(AUTHORIZATION, token.header_value()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        request.send().await.map_err(transport_error)
    }

    /// Decode a success body, or map a failure to the endpoint's reason
    async fn decode<T: DeserializeOwned>(
        response: Response,
        endpoint: Endpoint,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match endpoint {
                Endpoint::Session => session_error_reason(status.as_u16(), &body),
                Endpoint::Auth => auth_error_reason(&body),
            };
            debug!(status = status.as_u16(), reason = %message, "Request failed");
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else {
                BackendError::Malformed(format!("Invalid response body: {}", e))
            }
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn create_session(&self, token: Option<&AuthToken>) -> Result<SessionId, BackendError> {
        let request = self
            .http
            .post(self.url("/api/sessions/"))
            .json(&serde_json::json!({}));
        let response = self.send(Self::authorized(request, token)).await?;
        debug!(status = response.status().as_u16(), "Session response");

        let created: SessionCreated = Self::decode(response, Endpoint::Session).await?;
        SessionId::try_new(created.session_id)
            .map_err(|e| BackendError::Malformed(format!("Invalid session id: {}", e)))
    }

    async fn get_messages(&self, session_id: &SessionId) -> Result<Vec<Message>, BackendError> {
        let request = self
            .http
            .get(self.url("/api/sessions/get_messages/"))
            .query(&[("session_id", session_id.as_str())]);
        let response = self.send(request).await?;

        let history: HistoryResponse = Self::decode(response, Endpoint::Session).await?;
        Ok(history
            .messages
            .into_iter()
            .map(HistoryEntry::into_message)
            .collect())
    }

    async fn post_message(
        &self,
        token: Option<&AuthToken>,
        session_id: &SessionId,
        message: &str,
    ) -> Result<String, BackendError> {
        let request = self
            .http
            .post(self.url("/api/sessions/send_message/"))
            .json(&SendMessageRequest {
                session_id: session_id.as_str(),
                message,
            });
        let response = self.send(Self::authorized(request, token)).await?;
        debug!(status = response.status().as_u16(), "Send message response");

        let body: SendMessageResponse = Self::decode(response, Endpoint::Session).await?;
        Ok(bot_reply_from(body))
    }
}

#[async_trait]
impl AuthBackend for HttpChatClient {
    async fn login(&self, form: &LoginForm) -> Result<StoredCredentials, BackendError> {
        let request = self
            .http
            .post(self.url("/api/login/"))
            .json(&LoginRequest::from(form));
        let response = self.send(request).await?;

        let body: AuthResponse = Self::decode(response, Endpoint::Auth).await?;
        Ok(body.into())
    }

    async fn signup(&self, form: &SignupForm) -> Result<StoredCredentials, BackendError> {
        let request = self
            .http
            .post(self.url("/api/signup/"))
            .json(&SignupRequest::from(form));
        let response = self.send(request).await?;

        let body: AuthResponse = Self::decode(response, Endpoint::Auth).await?;
        Ok(body.into())
    }

    async fn logout(&self, token: &AuthToken) -> Result<(), BackendError> {
        let request = self.http.post(self.url("/api/logout/"));
        let response = self.send(Self::authorized(request, Some(token))).await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Status {
                status: status.as_u16(),
                message: format!("HTTP error! status: {}", status.as_u16()),
            })
        }
    }

    async fn check_auth(&self, token: &AuthToken) -> Result<Identity, BackendError> {
        let request = self.http.get(self.url("/api/check-auth/"));
        let response = self.send(Self::authorized(request, Some(token))).await?;

        let body: CheckAuthResponse = Self::decode(response, Endpoint::Session).await?;
        body.into_identity()
    }
}

/// Map a `reqwest` send failure to a [`BackendError`]
pub(crate) fn transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = HttpChatClient::new("http://localhost:8000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/api/sessions/"),
            "http://localhost:8000/api/sessions/"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client =
            HttpChatClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = client.create_session(None).await.unwrap_err();

        assert!(err.is_transport());
    }
}
