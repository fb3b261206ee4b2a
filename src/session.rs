//! Session state
//!
//! A [`Session`] bundles everything the UI shows at one moment: the selected
//! problem, its inputs, the trace, and playback. [`Session::apply`] never
//! mutates in place; it returns the next revision, so a half-applied
//! transition is never observable.

use crate::controller::compute_trace_with_limit;
use crate::playback::{Playback, DEFAULT_SPEED};
use crate::registry::{AlgorithmDescriptor, InputMap};
use crate::trace::value::Value;
use crate::trace::{Trace, TraceEntry, DEFAULT_TRACE_LIMIT};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Everything a user (or the clock) can do to a session
#[derive(Debug, Clone)]
pub enum Action {
    SelectProblem(&'static AlgorithmDescriptor),
    SetInput { key: String, value: Value },
    StepForward,
    StepBackward,
    Reset,
    Play,
    Pause,
    TogglePlay,
    SetSpeed(Duration),
    /// Let a due autoplay timer fire
    Tick,
}

#[derive(Debug, Clone)]
pub struct Session {
    revision: u64,
    descriptor: &'static AlgorithmDescriptor,
    inputs: Arc<InputMap>,
    playback: Playback,
    trace_limit: usize,
}

impl Session {
    /// Open a problem with its default inputs
    pub fn new(descriptor: &'static AlgorithmDescriptor) -> Self {
        Self::with_inputs(descriptor, descriptor.inputs.clone(), DEFAULT_SPEED, DEFAULT_TRACE_LIMIT)
    }

    pub fn with_inputs(
        descriptor: &'static AlgorithmDescriptor,
        inputs: InputMap,
        speed: Duration,
        trace_limit: usize,
    ) -> Self {
        let trace = Arc::new(compute_trace_with_limit(descriptor, &inputs, trace_limit));
        Session {
            revision: 0,
            descriptor,
            inputs: Arc::new(inputs),
            playback: Playback::new(trace, speed),
            trace_limit,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn descriptor(&self) -> &'static AlgorithmDescriptor {
        self.descriptor
    }

    pub fn inputs(&self) -> &InputMap {
        &self.inputs
    }

    pub fn trace(&self) -> &Arc<Trace> {
        self.playback.trace()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn current(&self) -> Option<&TraceEntry> {
        self.playback.current()
    }

    /// Produce the next revision
    pub fn apply(&self, action: Action, now: Instant) -> Session {
        let mut next = self.clone();
        next.revision += 1;

        match action {
            Action::SelectProblem(descriptor) => {
                debug!(problem = descriptor.id, "problem selected");
                next.descriptor = descriptor;
                next.inputs = Arc::new(descriptor.inputs.clone());
                next.regenerate();
            }
            Action::SetInput { key, value } => {
                let mut inputs = (*self.inputs).clone();
                inputs.insert(key, value);
                if inputs == *self.inputs {
                    // same values, same trace; an edit still rewinds
                    next.playback.reset();
                } else {
                    next.inputs = Arc::new(inputs);
                    next.regenerate();
                }
            }
            Action::StepForward => {
                next.playback.step_forward();
            }
            Action::StepBackward => {
                next.playback.step_backward();
            }
            Action::Reset => next.playback.reset(),
            Action::Play => {
                next.playback.play(now);
            }
            Action::Pause => next.playback.pause(),
            Action::TogglePlay => {
                next.playback.toggle(now);
            }
            Action::SetSpeed(speed) => next.playback.set_speed(speed),
            Action::Tick => {
                next.playback.poll(now);
            }
        }

        next
    }

    fn regenerate(&mut self) {
        let trace = compute_trace_with_limit(self.descriptor, &self.inputs, self.trace_limit);
        self.playback.replace_trace(Arc::new(trace));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackStatus;
    use crate::registry::registry;

    fn two_sum() -> &'static AlgorithmDescriptor {
        registry().find("two-sum").unwrap()
    }

    #[test]
    fn test_apply_leaves_previous_revision_untouched() {
        let now = Instant::now();
        let first = Session::new(two_sum());
        let second = first.apply(Action::StepForward, now);
        assert_eq!(first.playback().cursor(), 0);
        assert_eq!(second.playback().cursor(), 1);
        assert_eq!(second.revision(), first.revision() + 1);
    }

    #[test]
    fn test_select_problem_resets_inputs_and_cursor() {
        let now = Instant::now();
        let session = Session::new(two_sum())
            .apply(Action::StepForward, now)
            .apply(Action::Play, now);
        let paths = registry().find("unique-paths").unwrap();
        let next = session.apply(Action::SelectProblem(paths), now);
        assert_eq!(next.descriptor().id, "unique-paths");
        assert_eq!(next.inputs(), &paths.inputs);
        assert_eq!(next.playback().status(), PlaybackStatus::Idle);
        assert!(!next.trace().is_empty());
    }

    #[test]
    fn test_same_input_keeps_trace_identity() {
        let now = Instant::now();
        let session = Session::new(two_sum()).apply(Action::StepForward, now);
        let next = session.apply(
            Action::SetInput {
                key: "target".to_string(),
                value: Value::Number(9),
            },
            now,
        );
        assert!(Arc::ptr_eq(session.trace(), next.trace()));
        assert_eq!(next.playback().cursor(), 0);
    }

    #[test]
    fn test_changed_input_regenerates() {
        let now = Instant::now();
        let session = Session::new(two_sum());
        let next = session.apply(
            Action::SetInput {
                key: "target".to_string(),
                value: Value::Number(26),
            },
            now,
        );
        assert!(!Arc::ptr_eq(session.trace(), next.trace()));
        let last = next.trace().last().unwrap();
        assert!(last.description.contains("[2, 3]"));
    }
}
