//! Identity domain.
//!
//! - [`entities::Identity`]: the signed-in user
//! - [`entities::AuthToken`]: bearer token sent as `Authorization: Token <token>`
//! - [`forms`]: sign-in and sign-up form data with required-field checks

pub mod entities;
pub mod forms;
