//! EVICHAIN terminal binary - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing on stderr
//! 3. Resolve the session user against the demo directory
//! 4. Open a dialogue session backed by the JSONL access log
//! 5. Feed stdin lines to the engine and play reveal frames on timers

mod cli;
mod console;

use std::future::Future;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use evichain_chat::{ChatError, Collaborators, DialogueEngine, SessionContext};
use evichain_core::access_log::{AccessLogSink, JsonlAccessLog};
use evichain_core::config::{resolve_path, EvichainConfig};
use evichain_core::directory::{InMemoryUserDirectory, UserDirectory};
use evichain_core::ledger::QrPayload;

use cli::CliArgs;
use console::{ConsoleInput, ConsoleObserver};

/// Build the session context from --user / --password.
fn session_context(args: &CliArgs) -> Result<SessionContext, Box<dyn std::error::Error>> {
    let Some(ref username) = args.user else {
        return Ok(SessionContext::anonymous());
    };
    let password = args.resolve_password().unwrap_or_default();
    let directory = InMemoryUserDirectory::with_demo_users();
    let user = directory.authenticate(username, &password)?;
    tracing::info!(user = %user.username, role = %user.role, "User authenticated");
    Ok(SessionContext::with_user(user))
}

/// Route one console line to the engine.
fn handle_line(engine: &mut DialogueEngine, line: &str) {
    let result = match ConsoleInput::classify(line) {
        ConsoleInput::Chat(text) => engine.submit_line(text),
        ConsoleInput::Scan(payload) => engine.verify_access(payload),
        ConsoleInput::Keys => {
            let keys = engine.issued_keys();
            if keys.is_empty() {
                println!(":: No QR codes issued this session.");
            }
            for key in &keys {
                match QrPayload::from(key).encode() {
                    Ok(payload) => println!("{}", payload),
                    Err(e) => tracing::warn!(error = %e, "Failed to encode QR payload"),
                }
            }
            Ok(())
        }
    };

    match result {
        Ok(()) | Err(ChatError::EmptyMessage) => {}
        Err(e) => tracing::warn!(error = %e, "Input rejected"),
    }
}

/// Drive the session until it closes, input ends, or `shutdown` resolves.
///
/// Input is only read while the engine is idle; anything typed during a
/// reveal stays buffered until it finishes.
async fn run_session<R, S>(engine: &mut DialogueEngine, input: R, shutdown: S)
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut lines = input.lines();

    while !engine.is_closed() {
        let delay = engine.next_frame_delay();
        tokio::select! {
            _ = tokio::time::sleep(delay.unwrap_or_default()), if delay.is_some() => {
                engine.advance();
            }
            line = lines.next_line(), if delay.is_none() => match line {
                Ok(Some(line)) => handle_line(engine, &line),
                Ok(None) => {
                    tracing::info!("Input closed");
                    engine.close();
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    engine.close();
                }
            },
            _ = &mut shutdown => {
                tracing::info!("Interrupted");
                engine.close();
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level can apply.
    let config_file = args.resolve_config_path();
    let loaded = EvichainConfig::load(&config_file);
    let config_level = loaded
        .as_ref()
        .map(|c| c.general.log_level.clone())
        .unwrap_or_default();

    // Tracing.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(args.resolve_log_level(&config_level))
            }),
        )
        .init();

    tracing::info!("Starting EVICHAIN terminal v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            if config_file.exists() {
                tracing::warn!(path = %config_file.display(), error = %e, "Failed to load config, using defaults");
            } else {
                tracing::debug!(path = %config_file.display(), "No config file, using defaults");
            }
            EvichainConfig::default()
        }
    };
    config.terminal.show_greeting = args.resolve_show_greeting(config.terminal.show_greeting);

    let context = match session_context(&args) {
        Ok(context) => context,
        Err(e) => {
            tracing::error!(error = %e, "Authentication failed");
            return Err(e);
        }
    };

    // Collaborators.
    let access_log_path = resolve_path(&config.general.access_log_path);
    tracing::info!(path = %access_log_path.display(), "Access log ready");
    let access_log: Arc<dyn AccessLogSink> = Arc::new(JsonlAccessLog::new(access_log_path));
    let observer = Arc::new(ConsoleObserver::new(std::io::stdout()));

    let mut engine = DialogueEngine::open(
        config.terminal.clone(),
        context,
        Collaborators::new(access_log),
        observer,
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    run_session(&mut engine, BufReader::new(tokio::io::stdin()), shutdown).await;

    Ok(())
}
