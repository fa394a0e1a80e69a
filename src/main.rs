#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use quillpad::buffer::TextBufferFactory;
use quillpad::config::{AppIdentity, JsonSettingsStore, MemorySettingsStore, SettingsStore};
use quillpad::event_handler::{handle_event, SessionEvent};
use quillpad::{SessionCoordinator, SessionNotification};

/// Headless session driver: opens files through the window coordinator
#[derive(Debug, Parser)]
#[command(name = "quillpad", version)]
struct Cli {
    /// Files to open, in order
    files: Vec<PathBuf>,

    /// Settings file (defaults to <config dir>/<organization>/<application>.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Keep settings in memory only
    #[arg(long, conflicts_with = "settings")]
    ephemeral: bool,

    /// Let windows with unsaved changes close without asking
    #[arg(long)]
    discard_unsaved: bool,

    /// Log level (trace, debug, info, warn, error); falls back to LOG_LEVEL
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_level(raw: &str) -> TraceLevel {
    match raw.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn drain(notifications: &Receiver<SessionNotification>) {
    for notification in notifications.try_iter() {
        match notification {
            SessionNotification::TitleChanged { window, title } => {
                info!(window = %window, title = %title, "Title");
            }
            SessionNotification::SaveEnabledChanged { window, enabled } => {
                info!(window = %window, enabled, "Save action");
            }
            other => info!(event = ?other, "Session"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .map(|raw| parse_level(&raw))
        .unwrap_or(TraceLevel::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let identity = AppIdentity::default();
    let settings: Box<dyn SettingsStore> = if cli.ephemeral {
        Box::new(MemorySettingsStore::new())
    } else if let Some(path) = &cli.settings {
        Box::new(JsonSettingsStore::open_at(path)?)
    } else {
        Box::new(JsonSettingsStore::open(&identity)?)
    };

    let factory = TextBufferFactory { discard_unsaved: cli.discard_unsaved };
    let (mut coordinator, notifications) = SessionCoordinator::new(identity, settings, Box::new(factory));

    let first = coordinator.create_window()?;
    drain(&notifications);

    let mut events = Vec::new();
    if !cli.files.is_empty() {
        events.push(SessionEvent::OpenFiles { window: first, paths: cli.files.clone() });
    }
    events.push(SessionEvent::Quit);

    for event in events {
        let _ = handle_event(&mut coordinator, event)
            .inspect_err(|err| error!("encountered error in 'handle_event': err={err:#}"));
        drain(&notifications);
    }

    info!(remaining = coordinator.window_count(), "Session finished");
    Ok(())
}
