//! HTTP client for the stateless widget endpoint
//!
//! `POST /send_message/` is CSRF-protected. The token comes from an explicit
//! value if configured, otherwise from the `csrftoken` cookie that the
//! server sets when the widget page is fetched.

use super::client::transport_error;
use super::wire::{WidgetRequest, WidgetResponse};
use async_trait::async_trait;
use botchat_application::{BackendError, WidgetBackend};
use botchat_domain::{CSRF_HEADER, WidgetReply, csrf_token_from_cookies};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

pub struct HttpWidgetClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
    page_path: String,
    explicit_token: Option<String>,
    /// Set once the widget page has been fetched for its cookie
    primed: OnceCell<()>,
}

impl HttpWidgetClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BackendError::Transport(format!("Invalid server URL: {}", e)))?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| BackendError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            jar,
            base_url,
            page_path: "/".to_string(),
            explicit_token: None,
            primed: OnceCell::new(),
        })
    }

    /// Page fetched to obtain the CSRF cookie
    pub fn with_page_path(mut self, path: impl Into<String>) -> Self {
        self.page_path = path.into();
        self
    }

    /// Use this token instead of the cookie; blank values are ignored
    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.explicit_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Transport(format!("Invalid URL path {}: {}", path, e)))
    }

    /// Fetch the widget page once so the server can set its CSRF cookie
    async fn prime_cookies(&self) {
        self.primed
            .get_or_init(|| async {
                let Ok(page) = self.endpoint(&self.page_path) else {
                    return;
                };
                match self.http.get(page).send().await {
                    Ok(response) => {
                        debug!(status = response.status().as_u16(), "Fetched widget page")
                    }
                    Err(e) => warn!("Could not fetch widget page for CSRF cookie: {}", e),
                }
            })
            .await;
    }

    /// Resolve the CSRF token: explicit value, then cookie, then empty
    async fn csrf_token(&self) -> String {
        if let Some(token) = &self.explicit_token {
            return token.clone();
        }

        self.prime_cookies().await;
        self.jar
            .cookies(&self.base_url)
            .and_then(|header| header.to_str().ok().and_then(csrf_token_from_cookies))
            .unwrap_or_default()
    }
}

#[async_trait]
impl WidgetBackend for HttpWidgetClient {
    async fn send(&self, message: &str) -> Result<WidgetReply, BackendError> {
        let token = self.csrf_token().await;
        if token.is_empty() {
            debug!("Sending widget message without CSRF token");
        }

        let response = self
            .http
            .post(self.endpoint("/send_message/")?)
            .header(CSRF_HEADER, token)
            .json(&WidgetRequest { message })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: format!(
                    "HTTP error! status: {}, response: {}",
                    status.as_u16(),
                    text
                ),
            });
        }

        let body: WidgetResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(format!("Invalid response body: {}", e)))?;
        Ok(reply_from(body))
    }
}

fn reply_from(body: WidgetResponse) -> WidgetReply {
    let present = |value: Option<String>| value.filter(|v| !v.is_empty());
    match (present(body.bot_response), present(body.error)) {
        (Some(text), _) => WidgetReply::BotResponse(text),
        (None, Some(error)) => WidgetReply::Error(error),
        (None, None) => WidgetReply::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> WidgetResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_reply_classification() {
        assert_eq!(
            reply_from(body(r#"{"bot_response": "hello"}"#)),
            WidgetReply::BotResponse("hello".into())
        );
        assert_eq!(
            reply_from(body(r#"{"error": "quota exceeded"}"#)),
            WidgetReply::Error("quota exceeded".into())
        );
        assert_eq!(
            reply_from(body(r#"{"bot_response": "", "error": "x"}"#)),
            WidgetReply::Error("x".into())
        );
        assert_eq!(reply_from(body("{}")), WidgetReply::Empty);
        assert_eq!(reply_from(body(r#"{"error": ""}"#)), WidgetReply::Empty);
        assert_eq!(
            reply_from(body(r#"{"bot_response": "", "error": ""}"#)),
            WidgetReply::Empty
        );
    }

    #[tokio::test]
    async fn test_explicit_token_wins_over_cookie() {
        let client = HttpWidgetClient::new("http://localhost:8000", Duration::from_secs(1))
            .unwrap()
            .with_csrf_token(Some("form-token".into()));

        assert_eq!(client.csrf_token().await, "form-token");
    }

    #[test]
    fn test_blank_explicit_token_is_ignored() {
        let client = HttpWidgetClient::new("http://localhost:8000", Duration::from_secs(1))
            .unwrap()
            .with_csrf_token(Some("  ".into()));

        assert!(client.explicit_token.is_none());
    }

    #[tokio::test]
    async fn test_token_read_from_cookie_jar() {
        let client = HttpWidgetClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let url = client.base_url.clone();
        client
            .jar
            .add_cookie_str("csrftoken=abc%3D%3D; Path=/", &url);

        assert_eq!(client.csrf_token().await, "abc==");
    }
}
