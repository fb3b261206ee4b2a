// Session revisions: every action yields a new, consistent bundle

use algoscope::playback::PlaybackStatus;
use algoscope::registry::registry;
use algoscope::session::{Action, Session};
use algoscope::trace::value::Value;
use std::time::{Duration, Instant};

#[test]
fn test_switching_problems_never_mixes_inputs() {
    let now = Instant::now();
    let mut session = Session::new(registry().find("two-sum").unwrap());
    session = session.apply(
        Action::SetInput {
            key: "target".to_string(),
            value: Value::Number(18),
        },
        now,
    );

    let zeroes = registry().find("set-matrix-zeroes").unwrap();
    session = session.apply(Action::SelectProblem(zeroes), now);

    assert!(session.inputs().get("target").is_none());
    assert!(session.inputs().contains_key("matrix"));
    assert!(!session.trace().is_empty());
    assert!(session.current().unwrap().variables.contains_key("matrix"));
}

#[test]
fn test_mismatched_input_gives_empty_trace_and_recovers() {
    let now = Instant::now();
    let session = Session::new(registry().find("two-sum").unwrap());

    // a number where a sequence is expected
    let broken = session.apply(
        Action::SetInput {
            key: "nums".to_string(),
            value: Value::Number(3),
        },
        now,
    );
    assert!(broken.trace().is_empty());
    assert!(broken.current().is_none());

    let fixed = broken.apply(
        Action::SetInput {
            key: "nums".to_string(),
            value: Value::Sequence(vec![1, 8]),
        },
        now,
    );
    assert_eq!(fixed.trace().last().unwrap().line, 8);
}

#[test]
fn test_autoplay_through_ticks() {
    let start = Instant::now();
    let speed = Duration::from_millis(100);
    let descriptor = registry().find("binary-search").unwrap();
    let mut session = Session::with_inputs(descriptor, descriptor.inputs.clone(), speed, 1_000);
    let len = session.trace().len();

    session = session.apply(Action::Play, start);
    for i in 1..len {
        session = session.apply(Action::Tick, start + speed * i as u32);
    }
    assert_eq!(session.playback().status(), PlaybackStatus::Paused(len - 1));

    // further ticks do nothing
    let after = session.apply(Action::Tick, start + speed * (len as u32 + 5));
    assert_eq!(after.playback().cursor(), len - 1);
}

#[test]
fn test_speed_change_while_playing_keeps_position() {
    let now = Instant::now();
    let session = Session::new(registry().find("unique-paths").unwrap())
        .apply(Action::Play, now)
        .apply(Action::SetSpeed(Duration::from_millis(200)), now);
    assert!(session.playback().is_playing());
    assert_eq!(session.playback().cursor(), 0);
    assert_eq!(session.playback().speed(), Duration::from_millis(200));
}
