//! Clock runner
//!
//! Owns the collaborators and the time state, and drives one loop
//! iteration at a time: maintenance, then display refresh, then resync.
//! The firmware calls [`Clock::bootstrap`] once and then
//! [`Clock::run_iteration`] forever.

pub mod report;

pub use report::{IterationReport, Refresh, SyncOutcome, SyncStatus};

use crate::config::ClockConfig;
use crate::display::DisplayFrame;
use crate::scheduler::Scheduler;
use crate::time::{LocalTime, TimeKeeper};
use crate::traits::{
    DigitDisplay, FetchError, MaintenanceService, MonotonicClock, NetworkLink, TimeSource,
};

/// The clock application
pub struct Clock<D, S, N, M, K> {
    config: ClockConfig,
    display: D,
    source: S,
    link: N,
    maintenance: M,
    monotonic: K,
    scheduler: Scheduler,
    keeper: TimeKeeper,
    status: SyncStatus,
}

impl<D, S, N, M, K> Clock<D, S, N, M, K>
where
    D: DigitDisplay,
    S: TimeSource,
    N: NetworkLink,
    M: MaintenanceService,
    K: MonotonicClock,
{
    pub fn new(
        config: ClockConfig,
        display: D,
        source: S,
        link: N,
        maintenance: M,
        monotonic: K,
    ) -> Self {
        Self {
            scheduler: Scheduler::new(&config),
            config,
            display,
            source,
            link,
            maintenance,
            monotonic,
            keeper: TimeKeeper::new(),
            status: SyncStatus::new(),
        }
    }

    /// Power-on sequence: placeholder frame, wait for the link, first sync
    ///
    /// Leaves both timers untouched, so the first refresh happens one
    /// display interval after boot.
    pub async fn bootstrap(&mut self) -> Result<SyncOutcome, D::Error> {
        self.display.show(&DisplayFrame::placeholder())?;
        self.link.wait_connected().await;
        Ok(self.resync().await)
    }

    /// Run one pass of the loop
    ///
    /// A display error is returned only after a due resync has run, since
    /// both timers were already reset by the poll.
    pub async fn run_iteration(&mut self) -> Result<IterationReport, D::Error> {
        self.maintenance.service();

        let due = self.scheduler.poll(self.monotonic.now_ms());

        let refreshed = if due.display_refresh {
            Some(self.refresh())
        } else {
            None
        };
        let resync = if due.resync {
            Some(self.resync().await)
        } else {
            None
        };

        Ok(IterationReport {
            due,
            refreshed: refreshed.transpose()?,
            resync,
        })
    }

    fn refresh(&mut self) -> Result<Refresh, D::Error> {
        let local = self.local_now();
        let frame = DisplayFrame::from_hour_minute(local.hour, local.minute);
        self.display.show(&frame)?;
        Ok(Refresh { local, frame })
    }

    async fn resync(&mut self) -> SyncOutcome {
        let connected = self.link.is_connected();
        let result = if connected {
            self.source.fetch_utc().await
        } else {
            Err(FetchError::NotConnected)
        };

        if let Ok(utc) = result {
            // Anchor at arrival, the fetch may have taken a while
            let uptime_ms = self.scheduler.track(self.monotonic.now_ms());
            self.keeper.set(utc, uptime_ms);
        }
        self.status.record(&result);

        SyncOutcome {
            connected,
            result,
            consecutive_failures: self.status.consecutive_failures,
        }
    }

    /// Local wall-clock time as of the last poll
    pub fn local_now(&self) -> LocalTime {
        let utc = self.keeper.now(self.scheduler.uptime_ms());
        self.config.timezone.local_time(utc)
    }

    pub fn time_keeper(&self) -> &TimeKeeper {
        &self.keeper
    }

    pub fn sync_status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn uptime_ms(&self) -> u64 {
        self.scheduler.uptime_ms()
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{decode, BitPattern, Digit};
    use crate::time::UtcInstant;
    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use heapless::{Deque, Vec};

    type Reply = Result<UtcInstant, FetchError>;

    /// Collaborator calls in the order they happened
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Service,
        Push(u8),
        Fetch,
    }

    type EventLog = RefCell<Vec<Event, 64>>;

    fn log(events: &EventLog, event: Event) {
        let _ = events.borrow_mut().push(event);
    }

    struct RecordingDisplay<'a> {
        pushed: &'a RefCell<Vec<BitPattern, 64>>,
        events: &'a EventLog,
    }

    impl DigitDisplay for RecordingDisplay<'_> {
        type Error = Infallible;

        fn push_digit(&mut self, pattern: BitPattern) -> Result<(), Infallible> {
            let _ = self.pushed.borrow_mut().push(pattern);
            if let Some(digit) = decode(pattern) {
                log(self.events, Event::Push(digit.value()));
            }
            Ok(())
        }
    }

    struct ScriptedSource<'a> {
        replies: &'a RefCell<Deque<Reply, 8>>,
        calls: &'a Cell<u32>,
        events: &'a EventLog,
    }

    impl TimeSource for ScriptedSource<'_> {
        const WORST_CASE_LATENCY_MS: u32 = 0;

        async fn fetch_utc(&mut self) -> Reply {
            self.calls.set(self.calls.get() + 1);
            log(self.events, Event::Fetch);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(FetchError::Timeout))
        }
    }

    struct FakeLink<'a> {
        up: &'a Cell<bool>,
        waits: &'a Cell<u32>,
    }

    impl NetworkLink for FakeLink<'_> {
        fn is_connected(&self) -> bool {
            self.up.get()
        }

        async fn wait_connected(&mut self) {
            self.waits.set(self.waits.get() + 1);
        }
    }

    struct CountingMaintenance<'a> {
        serviced: &'a Cell<u32>,
        events: &'a EventLog,
    }

    impl MaintenanceService for CountingMaintenance<'_> {
        fn service(&mut self) {
            self.serviced.set(self.serviced.get() + 1);
            log(self.events, Event::Service);
        }
    }

    struct ManualClock(Cell<u32>);

    impl MonotonicClock for ManualClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    type TestClock<'a> = Clock<
        RecordingDisplay<'a>,
        ScriptedSource<'a>,
        FakeLink<'a>,
        CountingMaintenance<'a>,
        &'a ManualClock,
    >;

    struct Harness {
        pushed: RefCell<Vec<BitPattern, 64>>,
        replies: RefCell<Deque<Reply, 8>>,
        calls: Cell<u32>,
        up: Cell<bool>,
        waits: Cell<u32>,
        serviced: Cell<u32>,
        events: EventLog,
        now: ManualClock,
    }

    impl Harness {
        fn new(replies: &[Reply]) -> Self {
            let mut queue = Deque::new();
            for reply in replies {
                queue.push_back(*reply).unwrap();
            }
            Self {
                pushed: RefCell::new(Vec::new()),
                replies: RefCell::new(queue),
                calls: Cell::new(0),
                up: Cell::new(true),
                waits: Cell::new(0),
                serviced: Cell::new(0),
                events: RefCell::new(Vec::new()),
                now: ManualClock(Cell::new(0)),
            }
        }

        fn clock(&self) -> TestClock<'_> {
            Clock::new(
                ClockConfig::default(),
                RecordingDisplay {
                    pushed: &self.pushed,
                    events: &self.events,
                },
                ScriptedSource {
                    replies: &self.replies,
                    calls: &self.calls,
                    events: &self.events,
                },
                FakeLink {
                    up: &self.up,
                    waits: &self.waits,
                },
                CountingMaintenance {
                    serviced: &self.serviced,
                    events: &self.events,
                },
                &self.now,
            )
        }

        fn set_now(&self, ms: u32) {
            self.now.0.set(ms);
        }

        fn pushed_digits(&self) -> Vec<u8, 64> {
            self.pushed
                .borrow()
                .iter()
                .map(|p| decode(*p).map(Digit::value).unwrap())
                .collect()
        }
    }

    fn utc(seconds: u32) -> UtcInstant {
        UtcInstant::from_unix_seconds(seconds)
    }

    #[test]
    fn test_bootstrap_shows_placeholder_then_syncs() {
        let harness = Harness::new(&[Ok(utc(1_699_999_940))]);
        let mut clock = harness.clock();

        let outcome = block_on(clock.bootstrap()).unwrap();

        assert!(outcome.is_success());
        assert!(outcome.connected);
        assert_eq!(harness.pushed_digits().as_slice(), &[9, 9, 9, 9]);
        assert_eq!(harness.waits.get(), 1);
        assert_eq!(harness.calls.get(), 1);
        assert_eq!(harness.serviced.get(), 0);
        assert!(clock.time_keeper().is_synced());
    }

    #[test]
    fn test_first_refresh_shows_local_time() {
        let harness = Harness::new(&[Ok(utc(1_699_999_940))]);
        let mut clock = harness.clock();
        block_on(clock.bootstrap()).unwrap();

        harness.set_now(59_999);
        let report = block_on(clock.run_iteration()).unwrap();
        assert!(report.due.is_idle());

        harness.set_now(60_000);
        let report = block_on(clock.run_iteration()).unwrap();
        let refresh = report.refreshed.unwrap();

        assert_eq!(refresh.local.to_text().as_str(), "14-11-2023 23:13:20");
        assert_eq!(refresh.local.abbreviation, "CET");
        assert_eq!(refresh.frame, DisplayFrame::from_hour_minute(23, 13));
        assert!(report.resync.is_none());
        assert_eq!(
            harness.pushed_digits().as_slice(),
            &[9, 9, 9, 9, 2, 3, 1, 3]
        );
    }

    #[test]
    fn test_failed_fetch_keeps_time() {
        let harness = Harness::new(&[Ok(utc(1_699_999_940)), Err(FetchError::Timeout)]);
        let mut clock = harness.clock();
        block_on(clock.bootstrap()).unwrap();

        harness.set_now(120_000);
        let report = block_on(clock.run_iteration()).unwrap();

        // Refresh runs first, from the still-valid extrapolated time
        assert_eq!(report.refreshed.unwrap().local.minute, 14);
        let outcome = report.resync.unwrap();
        assert_eq!(outcome.result, Err(FetchError::Timeout));
        assert_eq!(outcome.consecutive_failures, 1);
        assert_eq!(clock.time_keeper().current_utc(), utc(1_699_999_940));
        assert_eq!(harness.pushed.borrow().len(), 8);

        harness.set_now(130_000);
        let report = block_on(clock.run_iteration()).unwrap();
        assert!(report.due.is_idle());
        assert_eq!(harness.pushed.borrow().len(), 8);

        let status = clock.sync_status();
        assert_eq!(status.successes, 1);
        assert_eq!(status.failures, 1);
        assert_eq!(status.last_error, Some(FetchError::Timeout));
    }

    #[test]
    fn test_link_down_skips_fetch() {
        let harness = Harness::new(&[Ok(utc(1_000)), Ok(utc(2_000))]);
        let mut clock = harness.clock();
        block_on(clock.bootstrap()).unwrap();

        harness.up.set(false);
        harness.set_now(120_000);
        let outcome = block_on(clock.run_iteration()).unwrap().resync.unwrap();

        assert!(!outcome.connected);
        assert_eq!(outcome.result, Err(FetchError::NotConnected));
        assert_eq!(harness.calls.get(), 1);
        assert_eq!(clock.time_keeper().current_utc(), utc(1_000));
    }

    #[test]
    fn test_resync_reanchors_time() {
        let harness = Harness::new(&[Ok(utc(1_000)), Ok(utc(5_000))]);
        let mut clock = harness.clock();
        block_on(clock.bootstrap()).unwrap();

        harness.set_now(120_000);
        let report = block_on(clock.run_iteration()).unwrap();
        assert_eq!(report.resync.unwrap().result, Ok(utc(5_000)));
        assert_eq!(clock.time_keeper().now(120_000), utc(5_000));

        harness.set_now(180_000);
        let report = block_on(clock.run_iteration()).unwrap();
        let refresh = report.refreshed.unwrap();
        // 5_060 s is 01:24:20 UTC
        assert_eq!(refresh.local.to_text().as_str(), "01-01-1970 02:24:20");
        assert_eq!(refresh.frame, DisplayFrame::from_hour_minute(2, 24));
        assert!(report.resync.is_none());
    }

    #[test]
    fn test_maintenance_every_iteration() {
        let harness = Harness::new(&[Ok(utc(1_000))]);
        let mut clock = harness.clock();
        block_on(clock.bootstrap()).unwrap();

        for now in [10, 20, 30, 40, 50] {
            harness.set_now(now);
            assert!(block_on(clock.run_iteration()).unwrap().due.is_idle());
        }

        assert_eq!(harness.serviced.get(), 5);
        assert_eq!(clock.uptime_ms(), 50);
    }

    #[test]
    fn test_unsynced_clock_runs_from_epoch() {
        let harness = Harness::new(&[Err(FetchError::DnsFailure)]);
        let mut clock = harness.clock();
        let outcome = block_on(clock.bootstrap()).unwrap();
        assert_eq!(outcome.result, Err(FetchError::DnsFailure));

        harness.set_now(60_000);
        let refresh = block_on(clock.run_iteration()).unwrap().refreshed.unwrap();
        assert!(!clock.time_keeper().is_synced());
        assert_eq!(refresh.frame, DisplayFrame::from_hour_minute(1, 1));
    }

    #[test]
    fn test_iteration_order() {
        let harness = Harness::new(&[Ok(utc(1_699_999_940)), Ok(utc(1_800_000_000))]);
        let mut clock = harness.clock();
        block_on(clock.bootstrap()).unwrap();
        harness.events.borrow_mut().clear();

        harness.set_now(120_000);
        let report = block_on(clock.run_iteration()).unwrap();

        // Maintenance first, then the refresh, then the fetch
        assert_eq!(
            harness.events.borrow().as_slice(),
            &[
                Event::Service,
                Event::Push(2),
                Event::Push(3),
                Event::Push(1),
                Event::Push(4),
                Event::Fetch,
            ]
        );

        // The refresh still shows the time from before the resync
        let refresh = report.refreshed.unwrap();
        assert_eq!(refresh.local.to_text().as_str(), "14-11-2023 23:14:20");
        assert_eq!(report.resync.unwrap().result, Ok(utc(1_800_000_000)));
        assert_eq!(clock.time_keeper().current_utc(), utc(1_800_000_000));
    }

    #[test]
    fn test_service_precedes_each_iteration() {
        let harness = Harness::new(&[Ok(utc(1_000))]);
        let mut clock = harness.clock();
        block_on(clock.bootstrap()).unwrap();
        harness.events.borrow_mut().clear();

        for now in [60_000, 60_010] {
            harness.set_now(now);
            block_on(clock.run_iteration()).unwrap();
        }

        let events = harness.events.borrow();
        assert_eq!(events.first(), Some(&Event::Service));
        assert_eq!(events.len(), 6);
        assert_eq!(events[5], Event::Service);
    }

    #[derive(Debug, PartialEq, Eq)]
    struct PinFault;

    struct BrokenDisplay;

    impl DigitDisplay for BrokenDisplay {
        type Error = PinFault;

        fn push_digit(&mut self, _pattern: BitPattern) -> Result<(), PinFault> {
            Err(PinFault)
        }
    }

    #[test]
    fn test_display_error_does_not_skip_resync() {
        let harness = Harness::new(&[Ok(utc(5_000))]);
        let mut clock = Clock::new(
            ClockConfig::default(),
            BrokenDisplay,
            ScriptedSource {
                replies: &harness.replies,
                calls: &harness.calls,
                events: &harness.events,
            },
            FakeLink {
                up: &harness.up,
                waits: &harness.waits,
            },
            (),
            &harness.now,
        );

        harness.set_now(120_000);
        let result = block_on(clock.run_iteration());

        assert_eq!(result, Err(PinFault));
        assert_eq!(harness.calls.get(), 1);
        assert_eq!(clock.sync_status().successes, 1);
        assert_eq!(clock.time_keeper().current_utc(), utc(5_000));
    }
}
