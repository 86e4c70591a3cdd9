//! App mode: identity gate in front of the chat REPL
//!
//! Unauthenticated users get the auth form; authenticated users get the
//! chat. Signing out from the chat returns to the auth form.

use crate::auth::{AuthForm, AuthSubmission};
use crate::chat::{ChatRepl, InterruptRouter, MarkdownRenderer, ReplExit, TerminalChatView};
use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use botchat_application::{
    AuthBackend, AuthError, ChatBackend, ChatController, CredentialStore, IdentityGate,
    RevealPacer,
};
use botchat_domain::{AuthMode, Identity};
use colored::Colorize;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that end an interactive session
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// The signed-in chat application
pub struct ChatApp<C: ChatBackend + AuthBackend + 'static> {
    client: Arc<C>,
    credentials: Arc<dyn CredentialStore>,
    pacer: Arc<dyn RevealPacer>,
    output: OutputConfig,
    repl: ReplConfig,
}

impl<C: ChatBackend + AuthBackend + 'static> ChatApp<C> {
    pub fn new(
        client: Arc<C>,
        credentials: Arc<dyn CredentialStore>,
        pacer: Arc<dyn RevealPacer>,
    ) -> Self {
        Self {
            client,
            credentials,
            pacer,
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    fn gate(&self) -> IdentityGate<C> {
        IdentityGate::new(Arc::clone(&self.client), Arc::clone(&self.credentials))
    }

    /// Run until the user quits
    pub async fn run(&self) -> Result<(), AppError> {
        let gate = self.gate();
        let interrupts = InterruptRouter::install();
        println!("{}", "Loading...".dimmed());
        let mut identity = gate.restore().await;

        loop {
            let user = match identity.take() {
                Some(user) => user,
                None => match Self::sign_in(&gate, AuthForm::new()).await? {
                    Some(user) => user,
                    None => return Ok(()),
                },
            };

            match self.chat(user, &interrupts).await? {
                ReplExit::Quit => return Ok(()),
                ReplExit::Logout => {
                    gate.logout().await?;
                    println!("{}", "Signed out.".dimmed());
                }
            }
        }
    }

    /// One-shot sign-in or sign-up; returns the identity on success
    pub async fn authenticate(&self, mode: AuthMode) -> Result<Option<Identity>, AppError> {
        Self::sign_in(&self.gate(), AuthForm::fixed(mode)).await
    }

    /// Verify the stored token with the server
    pub async fn whoami(&self) -> Option<Identity> {
        self.gate().restore().await
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        Ok(self.gate().logout().await?)
    }

    /// Show the auth form until sign-in succeeds or the user quits
    ///
    /// A locked form gives up after one failed attempt.
    async fn sign_in(
        gate: &IdentityGate<C>,
        mut form: AuthForm,
    ) -> Result<Option<Identity>, AppError> {
        loop {
            let result = match form.prompt()? {
                AuthSubmission::Login(login) => gate.login(&login).await,
                AuthSubmission::Signup(signup) => gate.signup(&signup).await,
                AuthSubmission::Quit => return Ok(None),
            };

            match result {
                Ok(identity) => {
                    info!(username = %identity.username, "Authenticated");
                    return Ok(Some(identity));
                }
                Err(e @ AuthError::Storage(_)) => return Err(e.into()),
                Err(e) => {
                    println!("{}", e.to_string().red());
                    if form.is_locked() {
                        return Ok(None);
                    }
                }
            }
        }
    }

    async fn chat(
        &self,
        user: Identity,
        interrupts: &InterruptRouter,
    ) -> Result<ReplExit, AppError> {
        let controller = ChatController::new(Arc::clone(&self.client), Arc::clone(&self.credentials))
            .with_pacer(Arc::clone(&self.pacer));
        let view = TerminalChatView::new(MarkdownRenderer::new(self.output.render_markdown));

        let mut repl = ChatRepl::new(controller, view, user, interrupts.clone());
        Ok(repl.run(self.repl.history_file.as_deref()).await?)
    }
}

/// Print the signed-in user, or a hint when there is none
pub fn print_identity(identity: Option<&Identity>) {
    match identity {
        Some(identity) => println!("{}", ConsoleFormatter::identity(identity)),
        None => println!("{}", "Not signed in. Run `botchat login`.".yellow()),
    }
}
