//! Sign-in and sign-up prompts

mod form;

pub use form::{AuthForm, AuthSubmission};
