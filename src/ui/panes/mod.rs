//! TUI pane rendering modules
//!
//! Each pane is a stateless `render_*` function plus whatever pure helpers it
//! needs, so the line-building logic can be tested without a terminal.
//!
//! # Pane Modules
//!
//! - [`problems`]: Category sidebar with the problem list
//! - [`source`]: Reference listing with syntax highlighting and the active line
//! - [`explanation`]: Description of the current step
//! - [`visualizers`]: Grid, array, value and map views of the traced variables
//! - [`inputs`]: Current inputs and the inline editor
//! - [`status`]: Status bar with keybindings and playback state

pub mod explanation;
pub mod inputs;
pub mod problems;
pub mod source;
pub mod status;
pub mod visualizers;

// Re-export render functions for convenience
pub use explanation::render_explanation_pane;
pub use inputs::{render_inputs_pane, InputEdit};
pub use problems::render_problems_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use visualizers::render_visualizer_pane;
