//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: owns the [`Session`], runs the event loop, maps keys to actions
//! - **[`panes`]**: stateless render functions for each visible pane (problems,
//!   source, explanation, visualizers, inputs, status bar)
//! - **[`theme`]**: centralized color palette, including highlight role colors
//!
//! [`terminal_guard`] restores the terminal on exit and on panic.
//!
//! The entry point for consumers is [`App`]: construct it with a [`Session`] and
//! call [`App::run`] to start the event loop.
//!
//! [`Session`]: crate::session::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod terminal_guard;
pub mod theme;

pub use app::App;
pub use terminal_guard::{install_panic_hook, TerminalGuard};
