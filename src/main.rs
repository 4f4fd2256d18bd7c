use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use incident_wizard::{
    auth::AuthGate,
    backend::{BackendClient, MessageRole},
    config::{Config, LogFormat},
    router::{navigate, View},
    session::SessionStore,
    shell,
    wizard::ChatWidget,
};

/// Terminal front end for the incident wizard
#[derive(Parser, Debug)]
#[command(name = "incident-wizard", version, about)]
struct Cli {
    /// Override BACKEND_BASE_URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Page to show first
    #[arg(long, default_value = "/")]
    start: String,

    /// Open the chat panel immediately
    #[arg(long)]
    open: bool,
}

const HELP: &str = "\
Commands:
  :go <path>                 show a page (/, /login, /logout, /test, /metadata)
  :login <user> <password>   sign in
  :open | :close             show or hide the chat
  :reset                     start a new conversation
  :events                    print the clickstream
  :help                      this text
  :quit                      exit
Anything else is sent to the chat while it is open.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Incident Wizard starting..."
    );

    let backend = match BackendClient::new(&config.backend, config.request.clone()) {
        Ok(c) => {
            info!(base_url = %config.backend.base_url, "Backend client initialized");
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize backend client");
            return Err(e.into());
        }
    };

    let metadata = match &config.client.metadata_path {
        Some(path) => match shell::load_metadata(path) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(error = %e, "App metadata unavailable");
                None
            }
        },
        None => None,
    };

    let session = SessionStore::new(&config.client.version, &config.client.page_url);
    let mut widget = ChatWidget::new(backend, config.wizard.clone(), session);
    widget.mount(&config.client.user_agent, "");
    let mut auth = AuthGate::new();

    let mut stdout = tokio::io::stdout();
    let page = render(&navigate(&cli.start, &mut auth), &auth, &widget, metadata.as_ref()).await;
    stdout.write_all(page.as_bytes()).await?;
    if cli.open {
        widget.toggle();
    }
    stdout.write_all(format!("{}\n> ", HELP).as_bytes()).await?;
    stdout.flush().await?;

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        // EOF reached
        if bytes_read == 0 {
            info!("EOF received, shutting down");
            break;
        }

        let input = line.trim();
        let mut words = input.split_whitespace();

        let output = match words.next() {
            None => String::new(),
            Some(":quit") => break,
            Some(":help") => HELP.to_string(),
            Some(":go") => {
                let view = navigate(words.next().unwrap_or("/"), &mut auth);
                render(&view, &auth, &widget, metadata.as_ref()).await
            }
            Some(":login") => {
                let (user, pass) = (words.next().unwrap_or(""), words.next().unwrap_or(""));
                match auth.login(user, pass) {
                    Ok(()) => render(&View::Home, &auth, &widget, metadata.as_ref()).await,
                    Err(e) => e.to_string(),
                }
            }
            Some(":open") | Some(":close") => {
                let want_open = input.starts_with(":open");
                if widget.is_open() != want_open {
                    widget.toggle();
                }
                (if want_open { "Incident Wizard Chat" } else { "Chat closed" }).to_string()
            }
            Some(":reset") => {
                widget.reset();
                "New conversation started".to_string()
            }
            Some(":events") => serde_json::to_string_pretty(widget.session().clickstream())?,
            Some(_) if widget.is_open() => {
                if widget.submit(input) && widget.is_loading() {
                    stdout.write_all(b"Bot is typing...\n").await?;
                    stdout.flush().await?;
                }
                match widget.respond().await {
                    Some(reply) => format!("bot: {}", reply.content),
                    None => String::new(),
                }
            }
            Some(_) => "Chat is closed; type :open to start".to_string(),
        };

        if !output.is_empty() {
            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    let turns = widget
        .transcript()
        .iter()
        .filter(|m| m.role == MessageRole::User)
        .count();
    info!(turns, outcome = ?widget.outcome(), "Shutdown complete");
    Ok(())
}

/// Render a view inside the layout frame
async fn render(
    view: &View,
    auth: &AuthGate,
    widget: &ChatWidget<BackendClient>,
    metadata: Option<&serde_json::Value>,
) -> String {
    let body = match view {
        View::Home => match auth.user() {
            Ok(user) => shell::render_home(user),
            Err(_) => shell::render_login(),
        },
        View::Login => shell::render_login(),
        View::Metadata => shell::render_metadata(metadata),
        View::Test => match widget.backend().example_data().await {
            Ok(banks) => shell::render_test(Ok(banks.as_slice())),
            Err(e) => shell::render_test(Err(e.to_string().as_str())),
        },
        View::NotFound(path) => shell::render_not_found(path),
    };
    shell::frame(&body)
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
