//! Publication of live schedule state.
//!
//! The tracker owns the selected person's index and publishes each computed
//! state as an immutable, versioned [`StateSnapshot`] on a `watch` channel.
//! Recompute and publish happen under one lock, so at most one computation is
//! in flight and versions reach subscribers in order. A subscriber that falls
//! behind skips straight to the latest snapshot and never sees one twice.
//!
//! ## Usage
//!
//! ```ignore
//! let tracker = Arc::new(ScheduleTracker::new(Arc::new(SystemClock)));
//! tracker.select(&loader, &person).await?;   // publishes immediately
//! let ticker = spawn_ticker(tracker.clone(), Duration::from_secs(1));
//! let mut rx = tracker.subscribe();
//! while rx.changed().await.is_ok() { render(rx.borrow_and_update().clone()); }
//! ticker.stop().await;
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::compute::ScheduleStateEngine;
use super::state::ScheduleState;
use crate::clock::Clock;
use crate::error::{LoadError, ValidationError};
use crate::loader::{Person, TimetableLoader};
use crate::timetable::{ScheduleIndex, WeekTimetable};

/// One published state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// Strictly increasing per publish.
    pub version: u64,
    pub person: Option<String>,
    pub computed_at: NaiveDateTime,
    pub state: ScheduleState,
}

/// What subscribers observe: `None` until a timetable is installed, and again
/// after it is cleared.
pub type Published = Option<Arc<StateSnapshot>>;

#[derive(Default)]
struct Inner {
    person: Option<String>,
    engine: Option<ScheduleStateEngine>,
    version: u64,
}

pub struct ScheduleTracker {
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
    tx: watch::Sender<Published>,
}

impl ScheduleTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            clock,
            inner: Mutex::new(Inner::default()),
            tx,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn subscribe(&self) -> watch::Receiver<Published> {
        self.tx.subscribe()
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> Published {
        self.tx.borrow().clone()
    }

    pub fn person(&self) -> Option<String> {
        self.lock().person.clone()
    }

    pub fn index(&self) -> Option<ScheduleIndex> {
        self.lock().engine.as_ref().map(|e| e.index().clone())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Install a new timetable and publish its state right away.
    ///
    /// Malformed intervals are dropped and returned.
    pub fn install(&self, person: Option<String>, timetable: WeekTimetable) -> Vec<ValidationError> {
        let build = ScheduleIndex::build_lenient(timetable);
        tracing::info!(
            person = person.as_deref().unwrap_or("-"),
            classes = build.index.class_count(),
            dropped = build.dropped.len(),
            "installing timetable"
        );

        let mut inner = self.lock();
        inner.person = person;
        inner.engine = Some(ScheduleStateEngine::new(build.index));
        self.publish(&mut inner);
        build.dropped
    }

    /// Load `person`'s timetable and install it.
    ///
    /// On failure the published state is cleared so consumers stop showing
    /// the previous person's classes.
    pub async fn select<L: TimetableLoader>(
        &self,
        loader: &L,
        person: &Person,
    ) -> Result<Vec<ValidationError>, LoadError> {
        match loader.load(person).await {
            Ok(timetable) => Ok(self.install(Some(person.name.clone()), timetable)),
            Err(err) => {
                tracing::warn!(person = %person.name, %err, "timetable load failed");
                self.clear();
                Err(err)
            }
        }
    }

    /// Recompute from the clock and publish. `None` when nothing is installed.
    pub fn refresh(&self) -> Option<Arc<StateSnapshot>> {
        let mut inner = self.lock();
        self.publish(&mut inner)
    }

    /// Forget the current timetable and publish `None`.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.person = None;
        inner.engine = None;
        self.tx.send_replace(None);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Recompute and publish while the caller holds the lock.
    fn publish(&self, inner: &mut Inner) -> Option<Arc<StateSnapshot>> {
        let now = self.clock.now();
        let state = inner.engine.as_ref()?.recompute(now);
        inner.version += 1;
        let snapshot = Arc::new(StateSnapshot {
            version: inner.version,
            person: inner.person.clone(),
            computed_at: now,
            state,
        });
        self.tx.send_replace(Some(snapshot.clone()));
        Some(snapshot)
    }
}

/// Handle to a running ticker task.
///
/// Dropping the handle also stops the task.
pub struct Ticker {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Stop ticking and wait for the task to exit. A refresh already running
    /// completes first.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Call `tracker.refresh()` every `period` on the current tokio runtime.
///
/// The first refresh happens one period after spawning; `install` has already
/// published the initial state. Late ticks are skipped rather than bursted.
pub fn spawn_ticker(tracker: Arc<ScheduleTracker>, period: Duration) -> Ticker {
    let period = period.max(Duration::from_millis(1));
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;
        tracing::debug!(?period, "ticker started");

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = interval.tick() => {
                    tracker.refresh();
                }
            }
        }
        tracing::debug!("ticker stopped");
    });

    Ticker {
        stop: Some(stop_tx),
        handle: Some(handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::timetable::ClassInfo;
    use chrono::{NaiveDate, TimeDelta, Weekday};
    use std::collections::HashMap;

    struct MemoryLoader(HashMap<String, WeekTimetable>);

    impl TimetableLoader for MemoryLoader {
        async fn load(&self, person: &Person) -> Result<WeekTimetable, LoadError> {
            self.0
                .get(&person.name)
                .cloned()
                .ok_or_else(|| LoadError::NotFound(person.name.clone()))
        }
    }

    fn monday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn week() -> WeekTimetable {
        WeekTimetable::new().with_day(
            Weekday::Mon,
            vec![
                ClassInfo::new("A", "CS101", "Intro", "09:00", "10:00", "LT-1").unwrap(),
                ClassInfo::new("B", "MA201", "Algebra", "10:05", "11:35", "LT-2").unwrap(),
            ],
        )
    }

    fn tracker_at(h: u32, m: u32) -> (Arc<FixedClock>, Arc<ScheduleTracker>) {
        let clock = Arc::new(FixedClock::new(monday(h, m)));
        let tracker = Arc::new(ScheduleTracker::new(clock.clone()));
        (clock, tracker)
    }

    #[test]
    fn nothing_published_before_install() {
        let (_, tracker) = tracker_at(9, 30);
        assert!(tracker.latest().is_none());
        assert!(tracker.refresh().is_none());
    }

    #[test]
    fn install_publishes_immediately() {
        let (_, tracker) = tracker_at(9, 30);
        let dropped = tracker.install(Some("Jitish".into()), week());
        assert!(dropped.is_empty());

        let snap = tracker.latest().unwrap();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.person.as_deref(), Some("Jitish"));
        assert_eq!(snap.state.current_class().unwrap().slot, "A");
        assert_eq!(snap.state.current_remaining_secs(), 1800);
    }

    #[test]
    fn install_reports_dropped_entries() {
        let (_, tracker) = tracker_at(9, 30);
        let mut tt = week();
        tt.push(
            Weekday::Mon,
            ClassInfo::new("bad", "X", "Y", "12:00", "11:00", "").unwrap(),
        );
        let dropped = tracker.install(None, tt);
        assert_eq!(dropped.len(), 1);
        assert_eq!(tracker.index().unwrap().class_count(), 2);
    }

    #[test]
    fn refresh_follows_the_clock_and_bumps_version() {
        let (clock, tracker) = tracker_at(9, 30);
        tracker.install(None, week());

        clock.set(monday(10, 2));
        let snap = tracker.refresh().unwrap();
        assert_eq!(snap.version, 2);
        assert!(snap.state.current.is_none());
        assert_eq!(snap.state.upcoming_starts_in_secs(), 180);

        clock.advance(TimeDelta::minutes(3));
        let snap = tracker.refresh().unwrap();
        assert_eq!(snap.version, 3);
        assert_eq!(snap.state.current_class().unwrap().slot, "B");
    }

    #[tokio::test]
    async fn subscribers_see_each_version_once_in_order() {
        let (clock, tracker) = tracker_at(9, 0);
        let mut rx = tracker.subscribe();
        tracker.install(None, week());

        assert!(rx.has_changed().unwrap());
        let first = rx.borrow_and_update().clone().unwrap();
        assert_eq!(first.version, 1);
        assert!(!rx.has_changed().unwrap());

        clock.advance(TimeDelta::seconds(1));
        tracker.refresh();
        tracker.refresh();
        rx.changed().await.unwrap();
        let latest = rx.borrow_and_update().clone().unwrap();
        assert_eq!(latest.version, 3);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn select_installs_loaded_timetable() {
        let (_, tracker) = tracker_at(9, 30);
        let loader = MemoryLoader(HashMap::from([("Rahul".to_string(), week())]));

        tracker
            .select(&loader, &Person::from_file_name("Rahul.json"))
            .await
            .unwrap();
        assert_eq!(tracker.person().as_deref(), Some("Rahul"));
        assert_eq!(tracker.latest().unwrap().state.current_class().unwrap().slot, "A");
    }

    #[tokio::test]
    async fn failed_select_clears_published_state() {
        let (_, tracker) = tracker_at(9, 30);
        tracker.install(Some("Rahul".into()), week());
        let loader = MemoryLoader(HashMap::new());

        let err = tracker
            .select(&loader, &Person::from_file_name("Ghost.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(tracker.latest().is_none());
        assert!(tracker.person().is_none());
        assert!(tracker.refresh().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_refreshes_each_period_until_stopped() {
        let (clock, tracker) = tracker_at(9, 59);
        tracker.install(None, week());
        let ticker = spawn_ticker(tracker.clone(), Duration::from_secs(1));

        clock.set(monday(10, 0));
        tokio::time::sleep(Duration::from_millis(3500)).await;
        let snap = tracker.latest().unwrap();
        assert_eq!(snap.version, 4);
        assert!(snap.state.current.is_none());
        assert_eq!(snap.state.upcoming_class().unwrap().slot, "B");

        ticker.stop().await;
        let stopped_at = tracker.latest().unwrap().version;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(tracker.latest().unwrap().version, stopped_at);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_ticker_stops_refresh() {
        let (_, tracker) = tracker_at(9, 30);
        tracker.install(None, week());
        drop(spawn_ticker(tracker.clone(), Duration::from_secs(1)));
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(tracker.latest().unwrap().version, 1);
    }
}
