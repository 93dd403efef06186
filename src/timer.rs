//! Focus timer state machine
//!
//! Owns all countdown logic and lifecycle transitions for one session at
//! a time. The machine talks to its collaborators through traits: the
//! [`ItemStore`](crate::store::ItemStore) it fetched the item from (and
//! persists completion to), the
//! [`TickScheduler`](crate::sched::TickScheduler) that drives the
//! 1-second cadence, and the [`Notifier`](crate::notify::Notifier) for
//! the post-completion alert. View layers subscribe to a watch channel
//! instead of the machine pushing into display state.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    config::{PersistFailurePolicy, TimerConfig},
    notify::Notifier,
    sched::{TickHandle, TickScheduler},
    state::{TimedItem, TimerSession},
    store::{ItemStore, StoreError},
};

/// Wall-clock cadence of the countdown.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Delay between the session reset and the completion alert.
const ALERT_DELAY: Duration = Duration::from_secs(1);

/// The focus timer state machine, bound to one to-do item.
///
/// All transitions take `&self`; the session lives behind a mutex so the
/// scheduled tick callback and the owning view can both reach it.
/// Dropping the timer cancels any outstanding tick registration.
pub struct FocusTimer {
    shared: Arc<Shared>,
}

struct Shared {
    config: TimerConfig,
    store: Arc<dyn ItemStore>,
    scheduler: Arc<dyn TickScheduler>,
    notifier: Arc<dyn Notifier>,
    inner: Mutex<Inner>,
    update_tx: watch::Sender<TimerSession>,
    /// Keep the channel open even when no view is subscribed.
    _update_rx: watch::Receiver<TimerSession>,
}

struct Inner {
    session: TimerSession,
    item: TimedItem,
    /// At most one live tick registration, held here by invariant.
    handle: Option<TickHandle>,
}

impl FocusTimer {
    /// Activate the timer for `item_id`, fetching the item from the store
    /// the way a route resolver would before the timer view opens.
    pub fn activate(
        config: TimerConfig,
        item_id: &str,
        store: Arc<dyn ItemStore>,
        scheduler: Arc<dyn TickScheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StoreError> {
        let item = store.fetch(item_id)?;
        info!("Timer activated for item {} ({})", item.id, item.title);
        let (update_tx, update_rx) = watch::channel(TimerSession::new());
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                store,
                scheduler,
                notifier,
                inner: Mutex::new(Inner {
                    session: TimerSession::new(),
                    item,
                    handle: None,
                }),
                update_tx,
                _update_rx: update_rx,
            }),
        })
    }

    /// Subscribe to session snapshots; one is published on every transition.
    pub fn subscribe(&self) -> watch::Receiver<TimerSession> {
        self.shared.update_tx.subscribe()
    }

    /// Current session snapshot
    pub fn session(&self) -> TimerSession {
        self.shared
            .lock_inner()
            .map(|inner| inner.session.clone())
            .unwrap_or_default()
    }

    /// The item this timer is bound to
    pub fn item(&self) -> TimedItem {
        self.shared
            .lock_inner()
            .map(|inner| inner.item.clone())
            .unwrap_or_else(|| TimedItem::new("", ""))
    }

    /// Start a new countdown, or resume a paused one.
    ///
    /// A fresh session fixes `total_seconds` from the configured minutes;
    /// resuming keeps the remaining time untouched. Progress is forced to
    /// zero immediately, before the first tick arrives.
    pub fn start(&self) {
        let shared = &self.shared;
        let Some(mut inner) = shared.lock_inner() else {
            return;
        };
        if inner.session.is_active {
            debug!("Start ignored, session already running");
            return;
        }
        // Invariant: never schedule a second registration over a live one.
        if let Some(handle) = inner.handle.take() {
            handle.cancel();
        }
        if inner.session.remaining_seconds == 0 {
            let total = shared.config.total_seconds();
            inner.session.total_seconds = total;
            inner.session.remaining_seconds = total;
        }
        inner.session.is_active = true;
        inner.session.has_started = true;
        inner.session.progress = 0.0;
        shared.publish(&inner.session);
        info!(
            "Focus session started for item {} ({} remaining)",
            inner.item.id,
            inner.session.display()
        );

        let weak = Arc::downgrade(shared);
        inner.handle = Some(shared.scheduler.schedule_repeating(
            TICK_PERIOD,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.tick();
                }
            }),
        ));
    }

    /// Pause a running countdown, keeping the remaining time for resume.
    pub fn pause(&self) {
        let Some(mut inner) = self.shared.lock_inner() else {
            return;
        };
        if let Some(handle) = inner.handle.take() {
            handle.cancel();
        }
        if inner.session.is_active {
            info!("Focus session paused at {}", inner.session.display());
        }
        inner.session.is_active = false;
        self.shared.publish(&inner.session);
    }

    /// Reset the session to idle from any state.
    ///
    /// Also cancels a live tick registration, so resetting a running
    /// session never leaks ticks into the superseded session.
    pub fn reset(&self) {
        let Some(mut inner) = self.shared.lock_inner() else {
            return;
        };
        if let Some(handle) = inner.handle.take() {
            handle.cancel();
        }
        inner.session.reset_to_idle();
        self.shared.publish(&inner.session);
        debug!("Timer reset for item {}", inner.item.id);
    }

    /// Stop the countdown: pause, then reset.
    pub fn stop(&self) {
        self.pause();
        self.reset();
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        // Teardown must not leave a tick registration alive.
        if let Ok(mut inner) = self.shared.inner.lock() {
            if let Some(handle) = inner.handle.take() {
                handle.cancel();
            }
        }
    }
}

impl Shared {
    fn lock_inner(&self) -> Option<MutexGuard<'_, Inner>> {
        match self.inner.lock() {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!("Failed to lock timer session: {}", e);
                None
            }
        }
    }

    fn publish(&self, session: &TimerSession) {
        if let Err(e) = self.update_tx.send(session.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    /// One countdown tick. Invoked by the scheduled callback; ticks that
    /// outlive their session (cancelled a moment too late) are ignored.
    fn tick(&self) {
        let Some(mut inner) = self.lock_inner() else {
            return;
        };
        if !inner.session.is_active {
            debug!("Ignoring tick for an inactive session");
            return;
        }
        inner.session.remaining_seconds = inner.session.remaining_seconds.saturating_sub(1);
        inner.session.recompute_progress();
        debug!(
            "Tick: {} remaining, {:.1}% done",
            inner.session.display(),
            inner.session.progress
        );
        if inner.session.remaining_seconds == 0 {
            // The +1 padding in total_seconds makes progress hit exactly
            // 100 here.
            self.complete(&mut inner);
        }
        self.publish(&inner.session);
    }

    /// Completion side effects: cancel the tick, mark and persist the
    /// item, collapse back to idle, schedule the delayed alert.
    fn complete(&self, inner: &mut Inner) {
        if let Some(handle) = inner.handle.take() {
            handle.cancel();
        }
        inner.session.is_active = false;
        inner.item.mark_complete();
        info!("Countdown finished for item {}", inner.item.id);

        if let Err(e) = self.store.persist(&inner.item) {
            match self.config.persist_failure {
                PersistFailurePolicy::Ignore => {
                    warn!("Failed to persist completed item {}: {}", inner.item.id, e);
                }
                PersistFailurePolicy::Rollback => {
                    warn!(
                        "Failed to persist completed item {}, rolling back to paused: {}",
                        inner.item.id, e
                    );
                    inner.item.complete = false;
                    inner.item.completed_at = None;
                    // Park one second from done; the next start() replays
                    // the final tick and retries the persist.
                    inner.session.remaining_seconds = 1;
                    inner.session.recompute_progress();
                    return;
                }
            }
        }

        // Full bar shown momentarily, then the session collapses to idle.
        inner.session.progress = 100.0;
        self.publish(&inner.session);
        inner.session.reset_to_idle();

        let notifier = Arc::clone(&self.notifier);
        let item = inner.item.clone();
        // Fire-and-forget: the alert outlives the session on purpose.
        let _alert = self.scheduler.schedule_once(
            ALERT_DELAY,
            Box::new(move || notifier.completion_alert(&item)),
        );
    }
}
