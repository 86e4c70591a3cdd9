//! Domain layer for botchat
//!
//! This crate contains the entities and value objects of the chat client.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A server-assigned conversation context identified by an opaque
//! [`SessionId`]. The client tracks its lifecycle with [`SessionState`].
//!
//! ## Streaming reveal
//!
//! Bot replies arrive whole; [`Reveal`] turns one into the sequence of
//! prefixes shown while it is "typed out".
//!
//! ## Identity
//!
//! The signed-in user ([`Identity`]) and the bearer token ([`AuthToken`])
//! that authenticates requests, stored together as [`StoredCredentials`].

pub mod chat;
pub mod core;
pub mod identity;
pub mod reveal;
pub mod util;
pub mod widget;

// Re-export commonly used types
pub use chat::{
    message::{Message, MessageText, Sender},
    session::{SessionId, SessionState},
};
pub use core::error::DomainError;
pub use identity::{
    entities::{AuthToken, Identity, StoredCredentials},
    forms::{AuthMode, LoginForm, SignupForm},
};
pub use reveal::Reveal;
pub use widget::{
    csrf::{CSRF_COOKIE_NAME, CSRF_HEADER, csrf_token_from_cookies},
    reply::WidgetReply,
};
