//! HTTP adapters for the chatbot API
//!
//! - [`HttpChatClient`]: session and auth endpoints (app mode)
//! - [`HttpWidgetClient`]: the CSRF-protected widget endpoint

pub mod client;
pub mod widget;
pub mod wire;

pub use client::{DEFAULT_TIMEOUT, HttpChatClient};
pub use widget::HttpWidgetClient;
