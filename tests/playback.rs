// Playback driven by real traces and an injected clock

use algoscope::controller::compute_trace;
use algoscope::playback::{Playback, PlaybackStatus, DEFAULT_SPEED};
use algoscope::registry::registry;
use algoscope::trace::Trace;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn trace(id: &str) -> Arc<Trace> {
    let descriptor = registry().find(id).unwrap();
    Arc::new(compute_trace(descriptor, &descriptor.inputs))
}

/// Advance the clock one interval at a time until the timer stops
fn run_to_completion(playback: &mut Playback, start: Instant) -> usize {
    let mut now = start;
    let mut ticks = 0;
    while playback.next_deadline().is_some() {
        now += playback.speed();
        if playback.poll(now) {
            ticks += 1;
        }
    }
    ticks
}

#[test]
fn test_autoplay_stops_on_last_entry() {
    let trace = trace("two-sum");
    let len = trace.len();
    let mut playback = Playback::new(trace, DEFAULT_SPEED);

    let start = Instant::now();
    assert!(playback.play(start));
    assert_eq!(playback.status(), PlaybackStatus::Playing(0));

    let ticks = run_to_completion(&mut playback, start);
    assert_eq!(ticks, len - 1);
    assert_eq!(playback.status(), PlaybackStatus::Paused(len - 1));
    assert!(!playback.play(start), "play at the end is a no-op");
}

#[test]
fn test_step_bounds_hold_at_both_ends() {
    let mut playback = Playback::new(trace("unique-paths"), DEFAULT_SPEED);
    assert!(!playback.step_backward());
    assert_eq!(playback.cursor(), 0);

    while playback.step_forward() {}
    assert_eq!(playback.cursor(), playback.len() - 1);
    assert!(!playback.step_forward());
    assert!(playback.is_at_end());
}

#[test]
fn test_trace_replacement_mid_flight_drops_stale_timer() {
    let start = Instant::now();
    let mut playback = Playback::new(trace("two-sum"), Duration::from_millis(100));
    playback.play(start);
    playback.poll(start + Duration::from_millis(100));
    assert_eq!(playback.cursor(), 1);

    let stale = playback.pending_timer().unwrap();
    playback.replace_trace(trace("set-matrix-zeroes"));
    assert_eq!(playback.status(), PlaybackStatus::Idle);
    assert_eq!(playback.cursor(), 0);

    // the old callback arrives late and must be ignored
    assert!(!playback.fire(stale, start + Duration::from_secs(10)));
    assert_eq!(playback.cursor(), 0);
    assert!(playback.next_deadline().is_none());
}

#[test]
fn test_empty_trace_is_inert() {
    let mut playback = Playback::new(Arc::new(Trace::empty()), DEFAULT_SPEED);
    let now = Instant::now();
    assert!(playback.current().is_none());
    assert!(!playback.play(now));
    assert!(!playback.step_forward());
    assert!(!playback.step_backward());
    assert!(!playback.poll(now + Duration::from_secs(60)));
    assert_eq!(playback.cursor(), 0);
}
