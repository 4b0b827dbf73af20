//! Cursor-movement debouncing
//!
//! One [`DebounceScheduler`] per watched editor. It is a pure state machine:
//! callers feed it event times and act on the returned decision (run the
//! resolver now, arm a timer, or drop the event). The runtime owns the single
//! timer worker that turns [`MoveDecision::Schedule`] into a later
//! [`DebounceScheduler::on_timer`] call.
//!
//! ```text
//! quiet ──move──▶ RunNow (in flight) ──finish──▶ quiet
//!   │                    │
//!   └─move in burst──▶ pending ──timer, quiet for window──▶ Fire (in flight)
//!                        │  ▲
//!                        └──┘ timer early: Rearm for the rest of the window
//! ```

use std::time::{Duration, Instant};

/// Recommended quiet period before a burst of cursor moves triggers a resolve
pub const DEFAULT_QUIESCENCE_MS: u64 = 300;

/// Recommended suppression window after a panel row activation
pub const DEFAULT_ACTIVATION_COOLDOWN_MS: u64 = 1000;

/// Timing parameters for a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    pub quiescence: Duration,
    pub activation_cooldown: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiescence: Duration::from_millis(DEFAULT_QUIESCENCE_MS),
            activation_cooldown: Duration::from_millis(DEFAULT_ACTIVATION_COOLDOWN_MS),
        }
    }
}

/// What to do with a cursor-moved event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDecision {
    /// Quiet period elapsed: run the resolver right away
    RunNow,
    /// Burst started: arm a one-shot timer for `Duration`
    Schedule(Duration),
    /// A timer is already armed; the event is absorbed
    Coalesced,
    /// Inside the activation cooldown; the event is dropped
    Suppressed,
}

/// What to do when an armed timer goes off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDecision {
    /// Run the resolver now
    Fire,
    /// Events kept arriving; wait `Duration` more on the same timer
    Rearm(Duration),
    /// A resolution is still in flight; fire as soon as it finishes
    Deferred,
    /// Inside the activation cooldown; the burst is dropped
    Suppressed,
    /// No timer was armed (stale wakeup)
    Idle,
}

/// Per-editor debounce state
#[derive(Debug, Clone)]
pub struct DebounceScheduler {
    config: DebounceConfig,
    /// When a resolution last started; only updated when one actually runs
    last_event_time: Option<Instant>,
    /// Most recent event observed while a timer was armed
    last_seen: Option<Instant>,
    /// A timer is armed for this editor
    pending: bool,
    /// A resolution has been dispatched and not yet finished
    in_flight: bool,
    /// The timer elapsed during an in-flight resolution
    deferred: bool,
    activated_at: Option<Instant>,
}

impl DebounceScheduler {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            last_event_time: None,
            last_seen: None,
            pending: false,
            in_flight: false,
            deferred: false,
            activated_at: None,
        }
    }

    pub fn config(&self) -> DebounceConfig {
        self.config
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_event_time(&self) -> Option<Instant> {
        self.last_event_time
    }

    /// Record a cursor movement at `now`
    pub fn on_cursor_moved(&mut self, now: Instant) -> MoveDecision {
        if self.in_cooldown(now) {
            tracing::trace!("Cursor move suppressed by activation cooldown");
            return MoveDecision::Suppressed;
        }

        if self.pending {
            self.last_seen = Some(now);
            return MoveDecision::Coalesced;
        }

        let quiet = self
            .last_event_time
            .map_or(true, |last| now.saturating_duration_since(last) >= self.config.quiescence);

        if quiet && !self.in_flight {
            self.start_run(now);
            return MoveDecision::RunNow;
        }

        self.pending = true;
        self.last_seen = Some(now);
        tracing::trace!("Cursor burst started, arming {:?} timer", self.config.quiescence);
        MoveDecision::Schedule(self.config.quiescence)
    }

    /// The armed timer went off at `now`
    ///
    /// The timer fires once the window measured from the last observed event
    /// has passed; earlier wakeups re-arm for the remainder.
    pub fn on_timer(&mut self, now: Instant) -> TimerDecision {
        if !self.pending {
            return TimerDecision::Idle;
        }

        if let Some(seen) = self.last_seen {
            let deadline = seen + self.config.quiescence;
            if now < deadline {
                return TimerDecision::Rearm(deadline - now);
            }
        }

        if self.in_cooldown(now) {
            self.pending = false;
            tracing::trace!("Debounced resolve suppressed by activation cooldown");
            return TimerDecision::Suppressed;
        }

        if self.in_flight {
            self.deferred = true;
            return TimerDecision::Deferred;
        }

        self.pending = false;
        self.start_run(now);
        TimerDecision::Fire
    }

    /// A dispatched resolution finished (successfully or not)
    ///
    /// Returns true when a deferred timer should fire now; the scheduler has
    /// already marked that run as started.
    pub fn finish(&mut self, now: Instant) -> bool {
        self.in_flight = false;
        if !self.deferred {
            return false;
        }

        self.deferred = false;
        self.pending = false;
        if self.in_cooldown(now) {
            return false;
        }
        self.start_run(now);
        true
    }

    /// A panel row was activated; suppress resolves for the cooldown window
    pub fn note_activation(&mut self, now: Instant) {
        self.activated_at = Some(now);
    }

    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.activated_at.is_some_and(|at| {
            now.saturating_duration_since(at) < self.config.activation_cooldown
        })
    }

    fn start_run(&mut self, now: Instant) {
        self.last_event_time = Some(now);
        self.in_flight = true;
    }
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
