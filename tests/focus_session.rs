//! End-to-end focus session scenarios driven through the public API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use focus_timer::{
    ConfirmPrompt, FocusTimer, ItemStore, JsonFileStore, ManualScheduler, Navigator, Notifier,
    TimedItem, TimerConfig,
};

#[derive(Default)]
struct CountingNotifier {
    alerts: Mutex<u32>,
}

impl Notifier for CountingNotifier {
    fn completion_alert(&self, _item: &TimedItem) {
        *self.alerts.lock().unwrap() += 1;
    }
}

struct Decline;

impl ConfirmPrompt for Decline {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

#[derive(Default)]
struct RememberRedirect {
    target: Mutex<Option<String>>,
}

impl Navigator for RememberRedirect {
    fn redirect_to_item(&self, item_id: &str) {
        *self.target.lock().unwrap() = Some(item_id.to_string());
    }
}

/// A quarter-minute session against a file-backed store, start to finish:
/// sixteen ticks, one persisted completion, one delayed alert, and a
/// timer back in idle.
#[test]
fn quarter_minute_session_against_a_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");

    let store = Arc::new(JsonFileStore::open(&path).unwrap());
    store
        .persist(&TimedItem::new("write-tests", "write the tests"))
        .unwrap();

    let sched = ManualScheduler::new();
    let notifier = Arc::new(CountingNotifier::default());
    let timer = FocusTimer::activate(
        TimerConfig::new(0.25),
        "write-tests",
        Arc::clone(&store) as Arc<dyn ItemStore>,
        Arc::new(sched.clone()),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    )
    .unwrap();

    timer.start();
    let started = timer.session();
    assert_eq!(started.total_seconds, 16);
    assert_eq!(started.display(), "00:16");
    assert_eq!(started.progress, 0.0);

    // Halfway through the countdown the formula holds exactly.
    sched.fire_n(8);
    let midway = timer.session();
    assert_eq!(midway.remaining_seconds, 8);
    assert!((midway.progress - 50.0).abs() < 1e-9);

    sched.fire_n(8);
    let done = timer.session();
    assert_eq!(done.remaining_seconds, 0);
    assert_eq!(done.progress, 100.0);
    assert!(!done.is_active);
    assert!(!done.has_started);

    // Completion was written through, once, with the flag set.
    let reloaded = JsonFileStore::open(&path).unwrap();
    let item = reloaded.fetch("write-tests").unwrap();
    assert!(item.complete);
    assert!(item.completed_at.is_some());

    // The alert arrives on the fixed one-second delay, not before.
    assert_eq!(*notifier.alerts.lock().unwrap(), 0);
    assert_eq!(sched.last_delay(), Some(Duration::from_secs(1)));
    sched.run_delayed();
    assert_eq!(*notifier.alerts.lock().unwrap(), 1);

    // Superseded registrations are gone; more firing moves nothing.
    sched.fire_n(5);
    assert!(timer.session().is_idle());
}

/// Pause-resume keeps remaining time, and declining the leave prompt
/// redirects without actually blocking navigation.
#[test]
fn pause_resume_and_guard_decline_behavior() {
    let store = Arc::new(focus_timer::MemoryStore::with_items([TimedItem::new(
        "n1", "notes",
    )]));
    let sched = ManualScheduler::new();
    let timer = FocusTimer::activate(
        TimerConfig::new(0.25),
        "n1",
        Arc::clone(&store) as Arc<dyn ItemStore>,
        Arc::new(sched.clone()),
        Arc::new(focus_timer::LogNotifier),
    )
    .unwrap();

    timer.start();
    sched.fire_n(6);
    timer.pause();
    assert_eq!(timer.session().remaining_seconds, 10);

    // Declining the prompt over the paused session: redirect recorded,
    // navigation still reported as allowed, session untouched.
    let nav = RememberRedirect::default();
    assert!(timer.may_deactivate(&Decline, &nav));
    assert_eq!(nav.target.lock().unwrap().as_deref(), Some("n1"));
    assert_eq!(timer.session().remaining_seconds, 10);
    assert!(timer.session().has_started);

    // Resume picks up exactly where the pause left off.
    timer.start();
    assert_eq!(timer.session().remaining_seconds, 10);
    sched.fire_n(10);
    assert!(timer.session().is_idle());
    assert_eq!(store.persist_count(), 1);
}
