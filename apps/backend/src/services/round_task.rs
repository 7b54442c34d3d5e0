//! One tokio task per live round.
//!
//! The task owns the [`Round`] outright. Handlers talk to it over a command
//! channel, so flips, timer ticks and pending resolutions are applied one at
//! a time in arrival order. A finished round keeps answering queries for
//! its retention period, then the task exits.

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use vocab_match_core::{
    FlipOutcome, GameError, InstanceId, ResolutionToken, ResultSink, Round, RoundResult,
    RoundSnapshot, RoundTiming, TickOutcome,
};

const COMMAND_BUFFER: usize = 32;

/// Snapshot plus the result once the round has ended.
#[derive(Debug, Clone)]
pub struct RoundView {
    pub snapshot: RoundSnapshot,
    pub result: Option<RoundResult>,
}

impl RoundView {
    fn of(round: &Round) -> Self {
        Self {
            snapshot: round.snapshot(),
            result: round.result(),
        }
    }
}

pub type FlipReply = Result<(FlipOutcome, RoundView), GameError>;

#[derive(Debug)]
enum Command {
    Flip {
        instance_id: InstanceId,
        reply: oneshot::Sender<FlipReply>,
    },
    View {
        reply: oneshot::Sender<RoundView>,
    },
    Abandon,
}

/// The round task went away before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskGone;

/// Sending half of a round task.
#[derive(Debug, Clone)]
pub struct RoundTask {
    commands: mpsc::Sender<Command>,
}

impl RoundTask {
    /// Spawn the task for `round`. The timer starts immediately.
    ///
    /// Once the round ends the task stays up for `retention`, then exits;
    /// the returned handle completes at that point.
    pub fn spawn<S>(
        round: Round,
        timing: RoundTiming,
        retention: Duration,
        sink: S,
    ) -> (Self, JoinHandle<()>)
    where
        S: ResultSink + Send + 'static,
    {
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let handle = tokio::spawn(run(round, timing, retention, sink, receiver));
        (Self { commands }, handle)
    }

    pub async fn flip(&self, instance_id: InstanceId) -> Result<FlipReply, TaskGone> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Flip { instance_id, reply })
            .await
            .map_err(|_| TaskGone)?;
        response.await.map_err(|_| TaskGone)
    }

    pub async fn view(&self) -> Result<RoundView, TaskGone> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::View { reply })
            .await
            .map_err(|_| TaskGone)?;
        response.await.map_err(|_| TaskGone)
    }

    /// Stop the round. No result is reported for an abandoned round.
    pub async fn abandon(&self) {
        let _ = self.commands.send(Command::Abandon).await;
    }
}

async fn run<S: ResultSink>(
    mut round: Round,
    timing: RoundTiming,
    retention: Duration,
    mut sink: S,
    mut commands: mpsc::Receiver<Command>,
) {
    let tick_every = Duration::from_millis(timing.tick_interval_ms);
    let resolution_delay = Duration::from_millis(timing.resolution_delay_ms);

    let mut ticker = time::interval_at(Instant::now() + tick_every, tick_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut pending: Option<(ResolutionToken, Instant)> = None;
    let mut release_at: Option<Instant> = None;

    loop {
        let active = !round.phase().is_terminal();
        let resolve_at = pending.map(|(_, at)| at);

        tokio::select! {
            // Ticks win ties against resolutions.
            biased;

            _ = ticker.tick(), if active => {
                if let TickOutcome::TimedOut = round.tick() {
                    pending = None;
                    report(&mut round, &mut sink);
                    release_at = Some(Instant::now() + retention);
                }
            }

            _ = time::sleep_until(resolve_at.unwrap_or_else(Instant::now)), if resolve_at.is_some() => {
                if let Some((token, _)) = pending.take() {
                    round.resolve(token);
                    if round.phase().is_terminal() {
                        report(&mut round, &mut sink);
                        release_at = Some(Instant::now() + retention);
                    }
                }
            }

            command = commands.recv() => match command {
                Some(Command::Flip { instance_id, reply }) => {
                    let outcome = round.flip(instance_id);
                    if let Ok(FlipOutcome::ResolutionPending(token)) = outcome {
                        pending = Some((token, Instant::now() + resolution_delay));
                    }
                    let _ = reply.send(outcome.map(|outcome| (outcome, RoundView::of(&round))));
                }
                Some(Command::View { reply }) => {
                    let _ = reply.send(RoundView::of(&round));
                }
                Some(Command::Abandon) | None => {
                    tracing::debug!("round task stopped");
                    break;
                }
            },

            _ = time::sleep_until(release_at.unwrap_or_else(Instant::now)), if release_at.is_some() => {
                tracing::debug!("finished round released");
                break;
            }
        }
    }
}

fn report<S: ResultSink>(round: &mut Round, sink: &mut S) {
    if let Some(result) = round.take_result() {
        sink.round_finished(&result);
    }
}
