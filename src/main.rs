//! Focus Timer - a pomodoro-style countdown bound to a to-do item
//!
//! This is the host binary: it wires a real store, the tokio scheduler
//! and a log-backed notifier into the state machine, renders session
//! snapshots in the terminal, and maps a few stdin commands onto the
//! timer transitions.

use std::sync::Arc;

use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use focus_timer::{
    config::Config,
    guard::{ConfirmPrompt, Navigator},
    notify::LogNotifier,
    sched::TokioScheduler,
    state::TimedItem,
    store::{ItemStore, JsonFileStore, MemoryStore},
    timer::FocusTimer,
    utils::shutdown_signal,
};

/// The terminal host has no modal dialogs; quitting counts as confirming.
struct AutoConfirm;

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        info!("{} (auto-confirmed)", message);
        true
    }
}

/// There is no router to redirect; log where it would have gone.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect_to_item(&self, item_id: &str) {
        info!("Staying on /timer/{}", item_id);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={}", config.log_level()))
        .init();

    info!("Starting focus-timer");
    info!(
        "Configuration: item={}, minutes={}, persist-failure={:?}",
        config.item, config.minutes, config.on_persist_failure
    );

    let store: Arc<dyn ItemStore> = match &config.data_file {
        Some(path) => Arc::new(JsonFileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };

    // Seed the item when the store does not know it yet, so a session
    // can always be run against the requested id.
    if store.fetch(&config.item).is_err() {
        let title = config.title.clone().unwrap_or_else(|| config.item.clone());
        store.persist(&TimedItem::new(config.item.clone(), title))?;
        info!("Created item {} in the store", config.item);
    }

    let timer = FocusTimer::activate(
        config.timer_config(),
        &config.item,
        Arc::clone(&store),
        Arc::new(TokioScheduler),
        Arc::new(LogNotifier),
    )?;

    // Render session snapshots as they are published.
    let mut updates = timer.subscribe();
    let render = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let session = updates.borrow_and_update().clone();
            let filled = ((session.progress / 5.0).round() as usize).min(20);
            println!(
                "[{}{}] {}  {:>3.0}%",
                "#".repeat(filled),
                "-".repeat(20 - filled),
                session.display(),
                session.progress
            );
        }
    });

    timer.start();
    println!("Commands: p = pause, s = resume, r = reset, q = quit");

    let mut lines = BufReader::new(stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line?.as_deref() {
                    Some("p") => timer.pause(),
                    Some("s") => timer.start(),
                    Some("r") => timer.reset(),
                    Some("q") | None => {
                        if timer.may_deactivate(&AutoConfirm, &LogNavigator) {
                            break;
                        }
                    }
                    Some("") => {}
                    Some(other) => warn!("Unknown command: {}", other),
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                timer.stop();
                break;
            }
        }
    }

    render.abort();
    info!("Focus timer shutdown complete");
    Ok(())
}
