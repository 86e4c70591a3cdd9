//! Widget domain: the stateless chat surface posting to `/send_message/`.
//!
//! - [`csrf`]: locating the CSRF token in a cookie header
//! - [`reply::WidgetReply`]: the three shapes a widget response can take

pub mod csrf;
pub mod reply;
