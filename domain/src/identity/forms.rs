//! Sign-in and sign-up forms
//!
//! Every field shown by a form is required. Deeper rules (password length,
//! matching confirmation, email format, uniqueness) belong to the server.

use crate::core::error::DomainError;

/// Which form the auth screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome Back",
            AuthMode::Signup => "Create Account",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in to your account",
            AuthMode::Signup => "Sign up for a new account",
        }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Sign-in form data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require(&self.username, "Username")?;
        require(&self.password, "Password")
    }
}

/// Sign-up form data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        require(&self.username, "Username")?;
        require(&self.email, "Email address")?;
        require(&self.password, "Password")?;
        require(&self.confirm_password, "Confirm password")
    }
}
