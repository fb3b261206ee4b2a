//! # Introduction
//!
//! Algoscope records a step-by-step trace of a classic algorithm running on
//! user-supplied inputs, then plays that trace back in a terminal UI built
//! with [ratatui](https://docs.rs/ratatui). Every step carries the active
//! listing line, a one-sentence explanation, a snapshot of the variables and
//! highlight annotations for the visualizers.
//!
//! ## Pipeline
//!
//! ```text
//! Inputs → shape check → Generator → Trace → Playback → Session → TUI
//! ```
//!
//! 1. [`registry`]: the problem catalog. Each [`registry::AlgorithmDescriptor`]
//!    bundles default inputs, a reference listing, a visual config and a
//!    generator.
//! 2. [`generators`]: one deterministic trace generator per problem.
//! 3. [`trace`]: the [`trace::Trace`] data model and the
//!    [`trace::TraceRecorder`] generators write into.
//! 4. [`controller`]: validates inputs against the problem's shape and runs
//!    the generator; any failure yields an empty trace.
//! 5. [`playback`]: cursor, play/pause state machine and the autoplay timer.
//! 6. [`session`]: immutable per-revision bundle of problem, inputs, trace
//!    and playback.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use algoscope::controller::compute_trace;
//! use algoscope::registry::registry;
//!
//! let two_sum = registry().find("two-sum").unwrap();
//! let trace = compute_trace(two_sum, &two_sum.inputs);
//! assert_eq!(trace.last().unwrap().line, 8);
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod generators;
pub mod logging;
pub mod playback;
pub mod registry;
pub mod session;
pub mod trace;
pub mod ui;
