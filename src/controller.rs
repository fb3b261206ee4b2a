//! Trace controller
//!
//! Decides whether the current inputs fit the selected algorithm and, if they
//! do, runs its generator. Every failure mode ends in an empty trace:
//!
//! - inputs still shaped for a previously selected problem ([`ShapeMismatch`])
//! - a generator returning an error or panicking ([`GenerateError`])
//! - a trace that leaves out a visualized variable
//!
//! The controller holds no state. Callers decide when to recompute, by
//! comparing the descriptor and inputs they used last time.

use crate::error::{GenerateError, ShapeMismatch};
use crate::registry::{AlgorithmDescriptor, InputMap};
use crate::trace::{Trace, DEFAULT_TRACE_LIMIT};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, trace};

thread_local! {
    static IN_GENERATOR: Cell<bool> = const { Cell::new(false) };
}

/// Whether the current thread is inside [`run_generator`]
///
/// The terminal panic hook checks this so a caught generator panic neither
/// tears down the TUI nor prints over it.
pub fn generator_running() -> bool {
    IN_GENERATOR.with(Cell::get)
}

/// Sets the in-generator flag for its lifetime, restoring the previous value
/// on drop (including during unwinding)
struct GeneratorScope {
    previous: bool,
}

impl GeneratorScope {
    fn enter() -> Self {
        GeneratorScope {
            previous: IN_GENERATOR.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for GeneratorScope {
    fn drop(&mut self) {
        IN_GENERATOR.with(|flag| flag.set(self.previous));
    }
}

/// Check that every input the descriptor requires is present with the right kind
pub fn check_shape(
    descriptor: &AlgorithmDescriptor,
    inputs: &InputMap,
) -> Result<(), ShapeMismatch> {
    for (key, default) in &descriptor.inputs {
        let Some(value) = inputs.get(key) else {
            return Err(ShapeMismatch::MissingKey { key: key.clone() });
        };
        if value.kind() != default.kind() {
            return Err(ShapeMismatch::KindMismatch {
                key: key.clone(),
                expected: default.kind(),
                got: value.kind(),
            });
        }
    }
    Ok(())
}

/// Check that every visualized variable appears in every entry
pub fn validate_trace(descriptor: &AlgorithmDescriptor, trace: &Trace) -> Result<(), GenerateError> {
    for entry in trace {
        for viz in &descriptor.visual.visualizers {
            if !entry.variables.contains_key(viz.variable) {
                return Err(GenerateError::MissingVariable {
                    entry: entry.id,
                    variable: viz.variable.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Run the generator behind a fault boundary
pub fn run_generator(
    descriptor: &AlgorithmDescriptor,
    inputs: &InputMap,
    limit: usize,
) -> Result<Trace, GenerateError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _scope = GeneratorScope::enter();
        descriptor.generate_with_limit(inputs, limit)
    }));

    let trace = match outcome {
        Ok(result) => result?,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            return Err(GenerateError::Panicked { message });
        }
    };

    validate_trace(descriptor, &trace)?;
    Ok(trace)
}

/// Compute the trace for a descriptor and inputs with the default entry limit
pub fn compute_trace(descriptor: &AlgorithmDescriptor, inputs: &InputMap) -> Trace {
    compute_trace_with_limit(descriptor, inputs, DEFAULT_TRACE_LIMIT)
}

pub fn compute_trace_with_limit(
    descriptor: &AlgorithmDescriptor,
    inputs: &InputMap,
    limit: usize,
) -> Trace {
    if let Err(mismatch) = check_shape(descriptor, inputs) {
        debug!(problem = descriptor.id, %mismatch, "inputs not in sync, skipping generation");
        return Trace::empty();
    }

    match run_generator(descriptor, inputs, limit) {
        Ok(trace) => {
            trace!(problem = descriptor.id, entries = trace.len(), "trace generated");
            trace
        }
        Err(err) => {
            error!(problem = descriptor.id, error = %err, "trace generation failed");
            Trace::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;
    use crate::trace::value::Value;

    #[test]
    fn test_inputs_from_other_problem_mismatch() {
        let matrix_problem = registry().find("set-matrix-zeroes").unwrap();
        let paths_inputs = registry().find("unique-paths").unwrap().inputs.clone();
        assert_eq!(
            check_shape(matrix_problem, &paths_inputs),
            Err(ShapeMismatch::MissingKey {
                key: "matrix".to_string()
            })
        );
        assert!(compute_trace(matrix_problem, &paths_inputs).is_empty());
    }

    #[test]
    fn test_kind_mismatch() {
        let problem = registry().find("unique-paths").unwrap();
        let mut inputs = problem.inputs.clone();
        inputs.insert("m".to_string(), Value::Sequence(vec![3]));
        assert!(matches!(
            check_shape(problem, &inputs),
            Err(ShapeMismatch::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_extra_inputs_are_allowed() {
        let problem = registry().find("two-sum").unwrap();
        let mut inputs = problem.inputs.clone();
        inputs.insert("unused".to_string(), Value::Number(1));
        assert!(check_shape(problem, &inputs).is_ok());
        assert!(!compute_trace(problem, &inputs).is_empty());
    }

    #[test]
    fn test_limit_exceeded_degrades_to_empty() {
        let problem = registry().find("unique-paths").unwrap();
        assert!(compute_trace_with_limit(problem, &problem.inputs, 3).is_empty());
        assert!(matches!(
            run_generator(problem, &problem.inputs, 3),
            Err(GenerateError::TraceLimitExceeded { limit: 3 })
        ));
    }

    #[test]
    fn test_every_default_trace_is_valid() {
        for problem in registry().problems() {
            let trace = run_generator(problem, &problem.inputs, DEFAULT_TRACE_LIMIT)
                .unwrap_or_else(|e| panic!("{}: {}", problem.id, e));
            assert!(!trace.is_empty(), "{}", problem.id);
        }
    }
}
