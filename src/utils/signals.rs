//! Signal handling for graceful teardown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

/// Wait for SIGTERM or SIGINT so the host can stop the timer before exit.
///
/// Teardown with a live tick registration is a resource leak; the host
/// binary calls `stop()` once this resolves.
pub async fn shutdown_signal() {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
    .expect("Failed to create signal handler");

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}
