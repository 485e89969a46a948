use anyhow::{Context, Result};
use clap::Parser;
use core_config::{Config, PreferenceStore, load_from};
use core_events::{EVENT_CHANNEL_CAP, Event};
use core_preview::EXPORT_FILE_NAME;
use core_render::RenderEngine;
use core_state::{Playground, Settings};
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalCapabilities};
use std::path::Path;
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod cli;
mod runtime;
mod timers;

use cli::{Args, Command};
use runtime::{Runtime, RuntimeParts};

const LOG_FILE_NAME: &str = "livepad.log";

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // Global subscriber already installed; dropping the guard shuts the writer down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = load_from(args.config.clone()).context("loading configuration")?;
    match &args.command {
        Some(Command::Export(sources)) => {
            print!("{}", cli::export_page(sources));
            Ok(())
        }
        Some(Command::Suggest {
            kind,
            trigger,
            text,
        }) => {
            if !config.triggers_for(*kind).contains(*trigger) {
                warn!(target: "config", kind = kind.label(), trigger = %trigger, "trigger_not_configured_for_kind");
            }
            print!("{}", cli::suggest_lines(&config, *kind, *trigger, text));
            Ok(())
        }
        None => run_playground(&args, &config).await,
    }
}

async fn run_playground(args: &Args, config: &Config) -> Result<()> {
    let prefs = PreferenceStore::discover();
    let theme = prefs
        .as_ref()
        .and_then(PreferenceStore::load_theme)
        .unwrap_or_default();
    let playground = Playground::new(Settings::from_config(config), theme, args.sources.as_array());
    let engine = RenderEngine::new(TerminalCapabilities::detect());
    info!(
        target: "runtime.startup",
        theme = theme.as_str(),
        config = ?config.path,
        prefs = prefs.is_some(),
        "bootstrap_complete"
    );

    let mut backend = CrosstermBackend::new();
    backend.set_title("Livepad")?;
    let size = backend.size().context("querying terminal size")?;
    let terminal_guard = backend.enter_guard().context("entering terminal")?;

    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let runtime = Runtime::new(
        RuntimeParts {
            playground,
            engine,
            prefs,
            size,
            terminal_guard,
        },
        tx,
        rx,
    );
    let export = runtime.run().await?;

    if let Some(page) = export {
        eprintln!("{EXPORT_FILE_NAME}:");
        print!("{page}");
    }
    info!(target: "runtime", "exit");
    Ok(())
}
