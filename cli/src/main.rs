//! CLI entrypoint for botchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use botchat_application::{CredentialStore, InMemoryCredentialStore, WidgetChat};
use botchat_domain::AuthMode;
use botchat_infrastructure::{
    ConfigLoader, FileConfig, FileCredentialStore, HttpChatClient, HttpWidgetClient,
    TokioRevealPacer,
};
use botchat_presentation::{
    ChatApp, Cli, Command, MarkdownRenderer, OutputConfig, ReplConfig, TerminalChatView,
    WidgetRepl, print_identity,
};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting botchat");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;
    colored::control::set_override(config.output.color);

    match cli.command() {
        Command::Chat => build_app(&config)?.run().await?,
        Command::Login => authenticate(&config, AuthMode::Login).await?,
        Command::Signup => authenticate(&config, AuthMode::Signup).await?,
        Command::Logout => {
            build_app(&config)?.logout().await?;
            println!("Signed out.");
        }
        Command::Whoami => print_identity(build_app(&config)?.whoami().await.as_ref()),
        Command::Widget {
            message,
            csrf_token,
        } => run_widget(&config, message, csrf_token).await?,
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }

    config.validate()?;
    info!(server = %config.server.base_url, "Configuration loaded");
    Ok(config)
}

fn credential_store(config: &FileConfig) -> Arc<dyn CredentialStore> {
    match config
        .credentials
        .resolved_path()
        .or_else(FileCredentialStore::default_path)
    {
        Some(path) => Arc::new(FileCredentialStore::new(path)),
        None => {
            warn!("No data directory available; credentials will not be kept");
            Arc::new(InMemoryCredentialStore::new())
        }
    }
}

fn build_app(config: &FileConfig) -> Result<ChatApp<HttpChatClient>> {
    // === Dependency Injection ===
    let client = Arc::new(HttpChatClient::new(
        config.server.base_url.clone(),
        config.server.timeout(),
    )?);

    Ok(ChatApp::new(
        client,
        credential_store(config),
        TokioRevealPacer::from_millis(config.chat.reveal_delay_ms),
    )
    .with_output(OutputConfig {
        color: config.output.color,
        render_markdown: config.chat.render_markdown,
    })
    .with_repl(ReplConfig {
        history_file: config.repl.history_path(),
    }))
}

async fn authenticate(config: &FileConfig, mode: AuthMode) -> Result<()> {
    match build_app(config)?.authenticate(mode).await? {
        Some(identity) => {
            print_identity(Some(&identity));
            Ok(())
        }
        None => bail!("Not signed in"),
    }
}

async fn run_widget(
    config: &FileConfig,
    message: Option<String>,
    csrf_token: Option<String>,
) -> Result<()> {
    let client = HttpWidgetClient::new(&config.server.base_url, config.server.timeout())?
        .with_page_path(config.widget.page_path.clone())
        .with_csrf_token(csrf_token.or_else(|| config.widget.csrf_token.clone()));

    let chat = WidgetChat::new(Arc::new(client));
    let view = TerminalChatView::new(MarkdownRenderer::new(false));
    let mut repl = WidgetRepl::new(chat, view);

    match message {
        Some(message) => repl.send_once(&message).await,
        None => repl.run(config.repl.history_path().as_deref()).await?,
    }

    Ok(())
}
