//! Cursor-based playback over a generated step sequence.
//!
//! The controller owns a cursor in `0..=N` where `0` is the ready state and
//! `N` means every step has been applied. The visible MST and status message
//! are always those of `steps[cursor - 1]`, or the ready state at `0`, so a
//! navigation call either replaces the whole visible state or changes nothing.
//!
//! Autoplay is modelled as at most one [`PendingAdvance`]: a ticket plus the
//! instant it becomes due. The driver calls [`PlaybackController::poll`]
//! whenever it wakes up; an advance that was cancelled in the meantime simply
//! no longer exists, so a stale wake-up cannot move the cursor.

mod builder;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{debug, info, trace, warn};

use crate::{
    clock::{Clock, SystemClock},
    error::PlaybackError,
    graph::{Edge, EdgeId},
    steps::AlgorithmStep,
};

pub use self::builder::PlaybackBuilder;

/// Status message shown before any step has been applied.
pub const READY_MESSAGE: &str = "Ready to start algorithm";

/// Autoplay interval at speed 1.0.
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(2000);

/// Initial speed multiplier.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Longest autoplay interval accepted, whether configured directly or derived
/// from a slow speed.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// The single scheduled autoplay advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingAdvance {
    ticket: u64,
    due: Instant,
}

impl PendingAdvance {
    /// Returns the ticket identifying this scheduling.
    #[must_use]
    #[rustfmt::skip]
    pub const fn ticket(&self) -> u64 { self.ticket }

    /// Returns the instant the advance becomes due.
    #[must_use]
    #[rustfmt::skip]
    pub const fn due(&self) -> Instant { self.due }
}

/// Read-only view of the playback state for renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackView<'a> {
    /// Number of steps applied so far.
    pub cursor: usize,
    /// Total number of steps.
    pub total: usize,
    /// Whether autoplay is active.
    pub playing: bool,
    /// Current speed multiplier.
    pub speed: f64,
    /// MST edges visible at the cursor.
    pub visible_mst: &'a [Edge],
    /// Total weight of `visible_mst`.
    pub visible_cost: f64,
    /// Status message visible at the cursor.
    pub message: &'a str,
    /// Edge the next step will consider.
    pub highlighted_edge: Option<EdgeId>,
}

/// Navigation and timed autoplay over an immutable step sequence.
#[derive(Debug)]
pub struct PlaybackController<C = SystemClock> {
    steps: Arc<[AlgorithmStep]>,
    cursor: usize,
    playing: bool,
    base_interval: Duration,
    speed: f64,
    interval: Duration,
    pending: Option<PendingAdvance>,
    next_ticket: u64,
    clock: C,
}

impl<C: Clock> PlaybackController<C> {
    const fn from_parts(
        steps: Arc<[AlgorithmStep]>,
        base_interval: Duration,
        speed: f64,
        interval: Duration,
        clock: C,
    ) -> Self {
        Self {
            steps,
            cursor: 0,
            playing: false,
            base_interval,
            speed,
            interval,
            pending: None,
            next_ticket: 0,
            clock,
        }
    }

    /// Returns the number of steps applied so far.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cursor(&self) -> usize { self.cursor }

    /// Returns the length of the step sequence.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.steps.len() }

    /// Returns `true` when the sequence has no steps.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Returns `true` once every step has been applied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Returns whether autoplay is active.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_playing(&self) -> bool { self.playing }

    /// Returns the speed multiplier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn speed(&self) -> f64 { self.speed }

    /// Returns the autoplay interval at the current speed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn interval(&self) -> Duration { self.interval }

    /// Returns the step sequence being played.
    #[must_use]
    #[rustfmt::skip]
    pub fn steps(&self) -> &[AlgorithmStep] { &self.steps }

    /// Returns the most recently applied step.
    #[must_use]
    pub fn current_step(&self) -> Option<&AlgorithmStep> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.steps.get(index))
    }

    /// Returns the MST edges visible at the cursor.
    #[must_use]
    pub fn visible_mst(&self) -> &[Edge] {
        self.current_step().map_or(&[], AlgorithmStep::mst)
    }

    /// Returns the total weight of [`Self::visible_mst`].
    #[must_use]
    pub fn visible_cost(&self) -> f64 {
        self.current_step().map_or(0.0, AlgorithmStep::cost)
    }

    /// Returns the status message visible at the cursor.
    #[must_use]
    pub fn message(&self) -> &str {
        self.current_step()
            .map_or(READY_MESSAGE, AlgorithmStep::message)
    }

    /// Returns the id of the edge the next step will consider.
    #[must_use]
    pub fn highlighted_edge(&self) -> Option<EdgeId> {
        self.steps.get(self.cursor).map(|step| step.edge().id())
    }

    /// Returns the scheduled autoplay advance, if any.
    #[must_use]
    #[rustfmt::skip]
    pub const fn pending(&self) -> Option<PendingAdvance> { self.pending }

    /// Returns the instant the scheduled advance becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.due)
    }

    /// Returns how long until the scheduled advance becomes due, or `None`
    /// when nothing is scheduled.
    #[must_use]
    pub fn time_until_next_advance(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|due| due.saturating_duration_since(self.clock.now()))
    }

    /// Returns a consistent snapshot of everything a renderer needs.
    #[must_use]
    pub fn view(&self) -> PlaybackView<'_> {
        PlaybackView {
            cursor: self.cursor,
            total: self.steps.len(),
            playing: self.playing,
            speed: self.speed,
            visible_mst: self.visible_mst(),
            visible_cost: self.visible_cost(),
            message: self.message(),
            highlighted_edge: self.highlighted_edge(),
        }
    }

    /// Applies the next step. Returns `false` at the end of the sequence.
    ///
    /// While playing, the pending advance is rescheduled from now.
    pub fn step_forward(&mut self) -> bool {
        let applied = self.advance();
        if applied {
            self.reschedule();
        }
        applied
    }

    /// Reverts the last applied step. Returns `false` at the ready state.
    ///
    /// While playing, the pending advance is rescheduled from now.
    pub fn step_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, message = self.message(), "stepped backward");
        self.reschedule();
        true
    }

    /// Returns to the ready state and stops autoplay.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.playing = false;
        self.cursor = 0;
        debug!("playback reset");
    }

    /// Replaces the step sequence with the output of a new generation run.
    pub fn load(&mut self, steps: Arc<[AlgorithmStep]>) {
        self.cancel_pending();
        self.playing = false;
        self.cursor = 0;
        self.steps = steps;
        debug!(steps = self.steps.len(), "step sequence loaded");
    }

    /// Starts autoplay. Returns whether playback is now active.
    ///
    /// Playing a completed sequence is a no-op that leaves playback stopped.
    pub fn play(&mut self) -> bool {
        if self.playing {
            return true;
        }
        if self.is_complete() {
            return false;
        }
        self.playing = true;
        self.reschedule();
        if self.playing {
            debug!(cursor = self.cursor, "autoplay started");
        }
        self.playing
    }

    /// Stops autoplay and cancels the pending advance.
    pub fn pause(&mut self) {
        self.cancel_pending();
        if self.playing {
            self.playing = false;
            debug!(cursor = self.cursor, "autoplay paused");
        }
    }

    /// Switches between [`Self::play`] and [`Self::pause`]. Returns whether
    /// playback is now active.
    pub fn toggle_play(&mut self) -> bool {
        if self.playing {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Changes the speed multiplier, rescheduling any pending advance at the
    /// new interval.
    ///
    /// # Errors
    /// Returns [`PlaybackError::InvalidSpeed`] when `speed` is not positive and
    /// finite or would stretch the interval past [`MAX_INTERVAL`]; the
    /// previous speed stays in effect.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), PlaybackError> {
        let interval = interval_for(self.base_interval, speed)?;
        self.speed = speed;
        self.interval = interval;
        debug!(speed, interval_ms = interval.as_millis(), "speed changed");
        self.reschedule();
        Ok(())
    }

    /// Fires the pending advance if it is due.
    ///
    /// Applies exactly one step and returns its index, rescheduling while
    /// steps remain. Returns `None` when nothing was due.
    pub fn poll(&mut self) -> Option<usize> {
        let pending = self.pending?;
        let now = self.clock.now();
        if now < pending.due {
            return None;
        }
        self.pending = None;
        let index = self.cursor;
        if !self.advance() {
            self.playing = false;
            return None;
        }
        trace!(ticket = pending.ticket, index, "autoplay advance fired");
        if self.playing {
            self.schedule_from(now);
        }
        Some(index)
    }

    fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, message = self.message(), "stepped forward");
        if self.is_complete() && self.playing {
            self.playing = false;
            self.cancel_pending();
            info!(steps = self.steps.len(), "autoplay reached the final step");
        }
        true
    }

    fn reschedule(&mut self) {
        self.cancel_pending();
        if self.playing && !self.is_complete() {
            let now = self.clock.now();
            self.schedule_from(now);
        }
    }

    fn schedule_from(&mut self, now: Instant) {
        let Some(due) = now.checked_add(self.interval) else {
            warn!(
                interval_ms = self.interval.as_millis(),
                "autoplay deadline is not representable; stopping playback"
            );
            self.playing = false;
            return;
        };
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        trace!(ticket, cursor = self.cursor, "autoplay advance scheduled");
        self.pending = Some(PendingAdvance { ticket, due });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!(ticket = pending.ticket, "autoplay advance cancelled");
        }
    }
}

/// Computes `base / speed`, rejecting speeds that are not positive and
/// finite or whose interval exceeds [`MAX_INTERVAL`].
fn interval_for(base: Duration, speed: f64) -> Result<Duration, PlaybackError> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(PlaybackError::InvalidSpeed { got: speed });
    }
    match Duration::try_from_secs_f64(base.as_secs_f64() / speed) {
        Ok(interval) if interval <= MAX_INTERVAL => Ok(interval),
        _ => Err(PlaybackError::InvalidSpeed { got: speed }),
    }
}
