//! Terminal state guard
//!
//! Raw mode and the alternate screen are undone when the guard drops, so an
//! early `?` return or a panic in the event loop leaves a usable shell behind.

use crate::controller::generator_running;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Restores the terminal when dropped.
///
/// Create it with [`TerminalGuard::enter`], which switches the terminal into
/// raw mode and the alternate screen. Call [`TerminalGuard::cleanup`] to
/// restore explicitly and see the error; after that, drop does nothing.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on a failure still needs raw mode undone
        let guard = TerminalGuard { active: true };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restore the terminal now. Later calls and the drop are no-ops.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore_terminal() {
                tracing::debug!(error = %e, "terminal cleanup failed in drop");
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    stdout.flush()
}

/// Whether a panic on this thread should tear down the TUI.
///
/// Panics inside a generator are caught by the controller and shown as an
/// empty trace; the UI keeps running.
pub fn panic_restores_terminal() -> bool {
    !generator_running()
}

/// Install a panic hook that logs the panic, restores the terminal and then
/// hands over to the previously installed hook.
///
/// Call this before entering raw mode.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if !panic_restores_terminal() {
            tracing::error!(panic = %info, "generator panicked");
            return;
        }

        tracing::error!(panic = %info, "panic");
        if let Err(e) = restore_terminal() {
            tracing::debug!(error = %e, "failed to restore terminal in panic hook");
        }
        original_hook(info);
    }));
}
