//! Virtual-clock driver for a round.
//!
//! [`RoundDriver`] schedules timer ticks and the delayed resolution of a
//! revealed pair against a [`VirtualClock`] that only moves when the
//! caller advances it. Events due at the same instant fire tick first,
//! so a timeout always wins over a resolution scheduled for that moment.

use crate::error::Result;
use crate::round::{FlipOutcome, IgnoreReason, Resolution, ResolutionToken, Round, TickOutcome};
use crate::types::{InstanceId, RoundResult, RoundTiming};

/// Receives the result of a finished round. Called at most once per round.
pub trait ResultSink {
    fn round_finished(&mut self, result: &RoundResult);
}

impl ResultSink for Vec<RoundResult> {
    fn round_finished(&mut self, result: &RoundResult) {
        self.push(result.clone());
    }
}

/// Manually advanced millisecond clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now_ms: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn set(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

/// Something that happened while the clock advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    Tick(TickOutcome),
    Resolved(Resolution),
    Finished(RoundResult),
}

#[derive(Debug, Clone, Copy)]
struct PendingResolution {
    token: ResolutionToken,
    due_at_ms: u64,
}

/// Drives a [`Round`] from a virtual clock and reports its result to a sink.
#[derive(Debug)]
pub struct RoundDriver<S: ResultSink> {
    round: Round,
    timing: RoundTiming,
    clock: VirtualClock,
    next_tick_at_ms: Option<u64>,
    pending: Option<PendingResolution>,
    sink: S,
    abandoned: bool,
}

impl<S: ResultSink> RoundDriver<S> {
    pub fn new(round: Round, timing: RoundTiming, sink: S) -> Self {
        let tick_interval = timing.tick_interval_ms.max(1);
        let next_tick_at_ms = (!round.phase().is_terminal()).then_some(tick_interval);
        Self {
            round,
            timing,
            clock: VirtualClock::new(),
            next_tick_at_ms,
            pending: None,
            sink,
            abandoned: false,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn clock(&self) -> VirtualClock {
        self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Flip a card at the current instant, scheduling a resolution when it
    /// is the second card of a pair attempt.
    pub fn flip(&mut self, id: InstanceId) -> Result<FlipOutcome> {
        if self.abandoned {
            return Ok(FlipOutcome::Ignored(IgnoreReason::RoundOver));
        }
        let outcome = self.round.flip(id)?;
        if let FlipOutcome::ResolutionPending(token) = outcome {
            self.pending = Some(PendingResolution {
                token,
                due_at_ms: self.clock.now_ms() + self.timing.resolution_delay_ms,
            });
        }
        Ok(outcome)
    }

    /// Move the clock forward by `delta_ms`, firing every event that falls
    /// due on the way.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<DriverEvent> {
        let target = self.clock.now_ms().saturating_add(delta_ms);
        let mut events = Vec::new();

        while !self.abandoned {
            let tick_due = self.next_tick_at_ms.filter(|at| *at <= target);
            let resolution_due = self.pending.map(|p| p.due_at_ms).filter(|at| *at <= target);

            match (tick_due, resolution_due) {
                (Some(tick_at), Some(resolve_at)) if tick_at <= resolve_at => {
                    self.clock.set(tick_at);
                    self.fire_tick(&mut events);
                }
                (_, Some(resolve_at)) => {
                    self.clock.set(resolve_at);
                    self.fire_resolution(&mut events);
                }
                (Some(tick_at), None) => {
                    self.clock.set(tick_at);
                    self.fire_tick(&mut events);
                }
                (None, None) => break,
            }
        }

        self.clock.set(target);
        events
    }

    /// Resolve the pending pair now instead of waiting for its deadline.
    pub fn resolve_pending(&mut self) -> Vec<DriverEvent> {
        let mut events = Vec::new();
        if !self.abandoned {
            self.fire_resolution(&mut events);
        }
        events
    }

    /// End the round early. Cancels the timer and any pending resolution;
    /// no result is reported.
    pub fn abandon(&mut self) {
        self.abandoned = true;
        self.next_tick_at_ms = None;
        self.pending = None;
        tracing::debug!(
            score = self.round.score(),
            move_count = self.round.move_count(),
            "round abandoned"
        );
    }

    fn fire_tick(&mut self, events: &mut Vec<DriverEvent>) {
        let outcome = self.round.tick();
        events.push(DriverEvent::Tick(outcome));
        match outcome {
            TickOutcome::Running { .. } => {
                let interval = self.timing.tick_interval_ms.max(1);
                self.next_tick_at_ms = self.next_tick_at_ms.map(|at| at + interval);
            }
            TickOutcome::TimedOut | TickOutcome::Inactive => {
                self.next_tick_at_ms = None;
                self.pending = None;
                self.finish(events);
            }
        }
    }

    fn fire_resolution(&mut self, events: &mut Vec<DriverEvent>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if let Some(resolution) = self.round.resolve(pending.token) {
            events.push(DriverEvent::Resolved(resolution));
        }
        if self.round.phase().is_terminal() {
            self.next_tick_at_ms = None;
            self.finish(events);
        }
    }

    fn finish(&mut self, events: &mut Vec<DriverEvent>) {
        if let Some(result) = self.round.take_result() {
            self.sink.round_finished(&result);
            events.push(DriverEvent::Finished(result));
        }
    }
}
