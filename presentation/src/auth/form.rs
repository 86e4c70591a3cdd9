//! Interactive sign-in / sign-up form

use botchat_domain::{AuthMode, LoginForm, SignupForm};
use colored::Colorize;
use dialoguer::{Input, Password, Select};

/// What the user submitted from the auth screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSubmission {
    Login(LoginForm),
    Signup(SignupForm),
    Quit,
}

/// Auth screen that toggles between sign-in and sign-up
pub struct AuthForm {
    mode: AuthMode,
    /// Offer switching modes and quitting
    interactive: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            interactive: true,
        }
    }

    /// A form locked to one mode, for one-shot `login` / `signup`
    pub fn fixed(mode: AuthMode) -> Self {
        Self {
            mode,
            interactive: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Whether the form is locked to one mode
    pub fn is_locked(&self) -> bool {
        !self.interactive
    }

    /// Show the current form and collect one submission
    pub fn prompt(&mut self) -> dialoguer::Result<AuthSubmission> {
        loop {
            println!();
            println!("{}", self.mode.title().cyan().bold());
            println!("{}", self.mode.subtitle().dimmed());

            if self.interactive {
                let items = [
                    action_label(self.mode),
                    toggle_label(self.mode),
                    "Quit",
                ];
                match Select::new().items(&items).default(0).interact()? {
                    0 => {}
                    1 => {
                        self.mode = self.mode.toggled();
                        continue;
                    }
                    _ => return Ok(AuthSubmission::Quit),
                }
            }

            return match self.mode {
                AuthMode::Login => Ok(AuthSubmission::Login(Self::login_fields()?)),
                AuthMode::Signup => Ok(AuthSubmission::Signup(Self::signup_fields()?)),
            };
        }
    }

    fn login_fields() -> dialoguer::Result<LoginForm> {
        let username = text("Username")?;
        let password = secret("Password")?;
        Ok(LoginForm::new(username, password))
    }

    fn signup_fields() -> dialoguer::Result<SignupForm> {
        Ok(SignupForm {
            username: text("Username")?,
            email: text("Email address")?,
            password: secret("Password")?,
            confirm_password: secret("Confirm password")?,
        })
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

fn text(prompt: &str) -> dialoguer::Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
}

fn secret(prompt: &str) -> dialoguer::Result<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
}

fn action_label(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "Sign In",
        AuthMode::Signup => "Sign Up",
    }
}

fn toggle_label(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "Don't have an account? Sign up",
        AuthMode::Signup => "Already have an account? Sign in",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_mode() {
        assert_eq!(action_label(AuthMode::Login), "Sign In");
        assert_eq!(toggle_label(AuthMode::Signup), "Already have an account? Sign in");
    }

    #[test]
    fn test_fixed_form_keeps_mode() {
        let form = AuthForm::fixed(AuthMode::Signup);
        assert_eq!(form.mode(), AuthMode::Signup);
        assert!(form.is_locked());
        assert_eq!(AuthForm::new().mode(), AuthMode::Login);
    }
}
