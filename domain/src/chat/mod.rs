//! Chat domain.
//!
//! - [`message::Message`]: a single message in the transcript
//! - [`message::MessageText`]: validated, non-blank user input
//! - [`session::SessionId`] / [`session::SessionState`]: session lifecycle

pub mod message;
pub mod session;
