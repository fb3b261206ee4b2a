//! Playback engine
//!
//! Owns the cursor into a trace plus the play/pause state, and drives
//! autoplay from a single timer. The engine never reads the clock itself:
//! every operation that can arm or fire the timer takes `now`, so the event
//! loop and the tests decide what time it is.
//!
//! # States
//!
//! ```text
//! Idle@0 ──play──▶ Playing@i ──tick──▶ Playing@i+1 ──tick──▶ Paused@last
//!   │                 │
//!   └─step/reset──▶ Paused@i ◀──pause / step / reset──┘
//! ```
//!
//! Any navigation cancels autoplay. Replacing the trace goes back to
//! `Idle@0` and invalidates the armed timer, so a tick scheduled for the old
//! trace can never move the cursor over the new one.

use crate::trace::{Trace, TraceEntry};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

pub const DEFAULT_SPEED: Duration = Duration::from_millis(800);
pub const MIN_SPEED: Duration = Duration::from_millis(50);
pub const MAX_SPEED: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Paused,
    Playing,
}

/// Observable state: mode plus cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Paused(usize),
    Playing(usize),
}

/// Handle of an armed autoplay timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy)]
struct Timer {
    token: TimerToken,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct Playback {
    trace: Arc<Trace>,
    cursor: usize,
    mode: Mode,
    speed: Duration,
    timer: Option<Timer>,
    /// Bumped on every arm and cancel; only the newest token may fire
    generation: u64,
}

impl Playback {
    pub fn new(trace: Arc<Trace>, speed: Duration) -> Self {
        Playback {
            trace,
            cursor: 0,
            mode: Mode::Idle,
            speed: clamp_speed(speed),
            timer: None,
            generation: 0,
        }
    }

    pub fn trace(&self) -> &Arc<Trace> {
        &self.trace
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Entry under the cursor; None for an empty trace
    pub fn current(&self) -> Option<&TraceEntry> {
        self.trace.get(self.cursor)
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn status(&self) -> PlaybackStatus {
        match self.mode {
            Mode::Idle => PlaybackStatus::Idle,
            Mode::Paused => PlaybackStatus::Paused(self.cursor),
            Mode::Playing => PlaybackStatus::Playing(self.cursor),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.mode == Mode::Playing
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_end(&self) -> bool {
        !self.trace.is_empty() && self.cursor + 1 == self.trace.len()
    }

    /// The armed timer, if any
    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.timer.map(|t| t.token)
    }

    /// When the armed timer is due, for sizing the event loop's poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.map(|t| t.due)
    }

    /// Swap in a new trace. Always lands on `Idle@0` with no timer armed.
    pub fn replace_trace(&mut self, trace: Arc<Trace>) {
        self.cancel_timer();
        self.trace = trace;
        self.cursor = 0;
        self.mode = Mode::Idle;
        trace!(entries = self.trace.len(), "trace replaced, playback reset");
    }

    pub fn step_forward(&mut self) -> bool {
        self.stop();
        if self.cursor + 1 < self.trace.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn step_backward(&mut self) -> bool {
        self.stop();
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.cursor = 0;
    }

    /// Start autoplay. A no-op on an empty trace, at the terminal entry, or
    /// when already playing.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.mode == Mode::Playing || self.trace.is_empty() || self.is_at_end() {
            return false;
        }
        self.mode = Mode::Playing;
        self.arm(now);
        true
    }

    pub fn pause(&mut self) {
        if self.mode == Mode::Playing {
            self.stop();
        }
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_playing() {
            self.pause();
            true
        } else {
            self.play(now)
        }
    }

    /// Change the tick interval. An armed timer keeps its deadline; the new
    /// speed applies from the next tick on.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = clamp_speed(speed);
    }

    /// Fire the timer if it is due. Returns true when the cursor moved.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.timer {
            Some(timer) if timer.due <= now => self.fire(timer.token, now),
            _ => false,
        }
    }

    /// Deliver a timer callback. Tokens from cancelled timers are ignored.
    pub fn fire(&mut self, token: TimerToken, now: Instant) -> bool {
        if self.pending_timer() != Some(token) || self.mode != Mode::Playing {
            trace!(?token, "ignoring stale timer");
            return false;
        }
        self.timer = None;

        let next = self.cursor + 1;
        let last = self.trace.len().saturating_sub(1);
        if next < last {
            self.cursor = next;
            self.arm(now);
            true
        } else if next == last {
            self.cursor = next;
            self.mode = Mode::Paused;
            trace!(cursor = self.cursor, "autoplay reached the end");
            true
        } else {
            self.mode = Mode::Paused;
            false
        }
    }

    /// Leave `Idle`/`Playing` for `Paused`, dropping any timer
    fn stop(&mut self) {
        self.cancel_timer();
        self.mode = Mode::Paused;
    }

    fn arm(&mut self, now: Instant) {
        self.generation += 1;
        self.timer = Some(Timer {
            token: TimerToken(self.generation),
            due: now + self.speed,
        });
    }

    fn cancel_timer(&mut self) {
        if self.timer.take().is_some() {
            self.generation += 1;
        }
    }
}

pub fn clamp_speed(speed: Duration) -> Duration {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{Highlights, TraceRecorder, Variables};

    fn trace_of(len: usize) -> Arc<Trace> {
        let mut recorder = TraceRecorder::default();
        for i in 0..len {
            recorder
                .record(i + 1, format!("step {}", i), Variables::new(), Highlights::default())
                .unwrap();
        }
        Arc::new(recorder.finish())
    }

    #[test]
    fn test_starts_idle() {
        let playback = Playback::new(trace_of(3), DEFAULT_SPEED);
        assert_eq!(playback.status(), PlaybackStatus::Idle);
        assert_eq!(playback.current().map(|e| e.id), Some(0));
        assert!(playback.pending_timer().is_none());
    }

    #[test]
    fn test_step_bounds() {
        let mut playback = Playback::new(trace_of(2), DEFAULT_SPEED);
        assert!(!playback.step_backward());
        assert_eq!(playback.status(), PlaybackStatus::Paused(0));
        assert!(playback.step_forward());
        assert!(!playback.step_forward());
        assert_eq!(playback.cursor(), 1);
    }

    #[test]
    fn test_play_is_noop_at_end_and_on_empty() {
        let now = Instant::now();
        let mut empty = Playback::new(trace_of(0), DEFAULT_SPEED);
        assert!(!empty.play(now));
        assert!(empty.current().is_none());

        let mut single = Playback::new(trace_of(1), DEFAULT_SPEED);
        assert!(!single.play(now));
        assert!(!single.is_playing());
    }

    #[test]
    fn test_timer_only_fires_when_due() {
        let start = Instant::now();
        let mut playback = Playback::new(trace_of(4), Duration::from_millis(100));
        playback.play(start);
        assert!(!playback.poll(start + Duration::from_millis(99)));
        assert!(playback.poll(start + Duration::from_millis(100)));
        assert_eq!(playback.status(), PlaybackStatus::Playing(1));
    }

    #[test]
    fn test_manual_step_cancels_autoplay() {
        let start = Instant::now();
        let mut playback = Playback::new(trace_of(5), Duration::from_millis(100));
        playback.play(start);
        let token = playback.pending_timer().unwrap();
        playback.step_forward();
        assert_eq!(playback.status(), PlaybackStatus::Paused(1));
        assert!(playback.pending_timer().is_none());
        assert!(!playback.fire(token, start + Duration::from_secs(1)));
        assert_eq!(playback.cursor(), 1);
    }

    #[test]
    fn test_speed_change_is_not_retroactive() {
        let start = Instant::now();
        let mut playback = Playback::new(trace_of(5), Duration::from_millis(100));
        playback.play(start);
        playback.set_speed(Duration::from_millis(1000));
        assert_eq!(playback.next_deadline(), Some(start + Duration::from_millis(100)));

        let tick = start + Duration::from_millis(100);
        assert!(playback.poll(tick));
        assert_eq!(playback.next_deadline(), Some(tick + Duration::from_millis(1000)));
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut playback = Playback::new(trace_of(1), Duration::ZERO);
        assert_eq!(playback.speed(), MIN_SPEED);
        playback.set_speed(Duration::from_secs(60));
        assert_eq!(playback.speed(), MAX_SPEED);
    }

    #[test]
    fn test_reset_goes_to_paused_zero() {
        let start = Instant::now();
        let mut playback = Playback::new(trace_of(5), DEFAULT_SPEED);
        playback.step_forward();
        playback.step_forward();
        playback.play(start);
        playback.reset();
        assert_eq!(playback.status(), PlaybackStatus::Paused(0));
        assert!(playback.pending_timer().is_none());
    }

    #[test]
    fn test_toggle() {
        let start = Instant::now();
        let mut playback = Playback::new(trace_of(3), DEFAULT_SPEED);
        assert!(playback.toggle(start));
        assert!(playback.is_playing());
        assert!(playback.toggle(start));
        assert_eq!(playback.status(), PlaybackStatus::Paused(0));
    }
}
