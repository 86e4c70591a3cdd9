//! Wire types for the chatbot HTTP API
//!
//! Request and response bodies as the server sends them, plus the pure
//! functions that turn them into domain values or user-facing reasons.

use botchat_application::BackendError;
use botchat_domain::{
    AuthToken, Identity, LoginForm, Message, Sender, SignupForm, StoredCredentials,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason used when a send succeeds but carries no reply text
pub const NO_RESPONSE_MESSAGE: &str = "No response message found";

/// Reason used when an error body is not JSON
pub const UNPARSEABLE_ERROR: &str = "Failed to parse error response";

/// Reason used by the auth endpoints when the server gives none
pub const AUTH_FALLBACK_ERROR: &str = "Something went wrong";

// ==================== Sessions ====================

#[derive(Debug, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_user: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HistoryEntry {
    /// Convert to a domain message; an unparseable timestamp is dropped
    pub fn into_message(self) -> Message {
        let message = match Sender::from_is_user(self.is_user) {
            Sender::User => Message::user(self.message),
            Sender::Bot => Message::bot(self.message),
        };
        match self.timestamp.as_deref().and_then(parse_timestamp) {
            Some(timestamp) => message.with_timestamp(timestamp),
            None => message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub bot_message: Option<BotMessage>,
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BotMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Pick the bot's reply out of a send response
///
/// `bot_message.message`, then `response`, then [`NO_RESPONSE_MESSAGE`].
/// Empty strings count as absent.
pub fn bot_reply_from(response: SendMessageResponse) -> String {
    response
        .bot_message
        .and_then(|bot| bot.message)
        .filter(|text| !text.is_empty())
        .or(response.response.filter(|text| !text.is_empty()))
        .unwrap_or_else(|| NO_RESPONSE_MESSAGE.to_string())
}

// ==================== Auth ====================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a LoginForm> for LoginRequest<'a> {
    fn from(form: &'a LoginForm) -> Self {
        Self {
            username: &form.username,
            password: &form.password,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

impl<'a> From<&'a SignupForm> for SignupRequest<'a> {
    fn from(form: &'a SignupForm) -> Self {
        Self {
            username: &form.username,
            email: &form.email,
            password: &form.password,
            confirm_password: &form.confirm_password,
        }
    }
}

/// Body returned by login and signup
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl From<AuthResponse> for StoredCredentials {
    fn from(response: AuthResponse) -> Self {
        StoredCredentials::new(
            AuthToken::new(response.token),
            Identity::new(response.user_id, response.username, response.email),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckAuthResponse {
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

impl From<UserDto> for Identity {
    fn from(user: UserDto) -> Self {
        Identity::new(user.id, user.username, user.email)
    }
}

impl CheckAuthResponse {
    /// The verified identity, or an error when the server did not vouch for one
    pub fn into_identity(self) -> Result<Identity, BackendError> {
        match self.user {
            Some(user) if self.is_authenticated => Ok(user.into()),
            _ => Err(BackendError::Application("Not authenticated".to_string())),
        }
    }
}

// ==================== Widget ====================

#[derive(Debug, Serialize)]
pub struct WidgetRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct WidgetResponse {
    #[serde(default)]
    pub bot_response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ==================== Errors ====================

#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Reason for a non-success response from a session endpoint
///
/// The body's `error` field if it is JSON and has one, the status line if it
/// is JSON without one, [`UNPARSEABLE_ERROR`] if it is not JSON at all.
pub fn session_error_reason(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(error),
        }) if !error.is_empty() => error,
        Ok(_) => format!("HTTP error! status: {}", status),
        Err(_) => UNPARSEABLE_ERROR.to_string(),
    }
}

/// Reason for a non-success response from login or signup
pub fn auth_error_reason(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| AUTH_FALLBACK_ERROR.to_string())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}
