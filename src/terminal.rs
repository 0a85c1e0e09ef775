//! Terminal modes are process-wide, so they are only ever changed through a
//! [`TerminalGuard`], which puts everything back exactly once.

use std::io::{Stdout, Write, stdout};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};
use tracing::debug;

/// Screen and input-mode control. Every call is best effort: a failure is
/// logged and otherwise ignored.
pub trait TerminalControl {
    fn clear_screen(&mut self);
    fn hide_cursor(&mut self);
    fn show_cursor(&mut self);
    /// Switches stdin to unbuffered, no-echo input. Returns `false` when the
    /// terminal does not support it.
    fn enable_raw_input(&mut self) -> bool;
    fn disable_raw_input(&mut self);
}

pub struct CrosstermTerminal {
    out: Stdout,
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl TerminalControl for CrosstermTerminal {
    fn clear_screen(&mut self) {
        if let Err(err) = execute!(self.out, Clear(ClearType::All), MoveTo(0, 0)) {
            debug!(%err, "clear screen failed");
        }
    }

    fn hide_cursor(&mut self) {
        if let Err(err) = execute!(self.out, Hide) {
            debug!(%err, "hide cursor failed");
        }
    }

    fn show_cursor(&mut self) {
        if let Err(err) = execute!(self.out, Show) {
            debug!(%err, "show cursor failed");
        }
    }

    fn enable_raw_input(&mut self) -> bool {
        match terminal::enable_raw_mode() {
            Ok(()) => true,
            Err(err) => {
                debug!(%err, "raw mode unavailable, keeping line-buffered input");
                false
            }
        }
    }

    fn disable_raw_input(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            debug!(%err, "disable raw mode failed");
        }
    }
}

/// Stand-in for when stdout is not a terminal (piped or redirected). Writes
/// no escape sequences and never enables raw mode.
#[derive(Debug, Default)]
pub struct NoopTerminal;

impl TerminalControl for NoopTerminal {
    fn clear_screen(&mut self) {}
    fn hide_cursor(&mut self) {}
    fn show_cursor(&mut self) {}
    fn enable_raw_input(&mut self) -> bool {
        false
    }
    fn disable_raw_input(&mut self) {}
}

/// Holds the terminal in dashboard mode and restores it when released or
/// dropped, whichever comes first.
pub struct TerminalGuard {
    terminal: Box<dyn TerminalControl>,
    raw_enabled: bool,
    cursor_hidden: bool,
    released: bool,
}

impl TerminalGuard {
    pub fn acquire(mut terminal: Box<dyn TerminalControl>) -> Self {
        let raw_enabled = terminal.enable_raw_input();
        debug!(raw_enabled, "terminal acquired");
        TerminalGuard {
            terminal,
            raw_enabled,
            cursor_hidden: false,
            released: false,
        }
    }

    pub fn raw_enabled(&self) -> bool {
        self.raw_enabled
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn hide_cursor(&mut self) {
        self.terminal.hide_cursor();
        self.cursor_hidden = true;
    }

    pub fn clear_screen(&mut self) {
        self.terminal.clear_screen();
    }

    /// Shows the cursor and leaves raw mode. Later calls do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if self.cursor_hidden {
            self.terminal.show_cursor();
        }
        if self.raw_enabled {
            self.terminal.disable_raw_input();
        }
        debug!("terminal restored");
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Guard-less restore for the panic hook.
pub fn force_restore() {
    let _ = terminal::disable_raw_mode();
    let mut out = stdout();
    let _ = execute!(out, Show);
    let _ = out.flush();
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::TerminalControl;

    #[derive(Clone, Default)]
    pub struct RecordingTerminal {
        pub calls: Arc<Mutex<Vec<&'static str>>>,
        pub raw_supported: bool,
    }

    impl RecordingTerminal {
        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl TerminalControl for RecordingTerminal {
        fn clear_screen(&mut self) {
            self.push("clear");
        }
        fn hide_cursor(&mut self) {
            self.push("hide");
        }
        fn show_cursor(&mut self) {
            self.push("show");
        }
        fn enable_raw_input(&mut self) -> bool {
            self.push("raw_on");
            self.raw_supported
        }
        fn disable_raw_input(&mut self) {
            self.push("raw_off");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTerminal;
    use super::*;

    #[test]
    fn release_restores_exactly_once() {
        let term = RecordingTerminal {
            raw_supported: true,
            ..Default::default()
        };
        let mut guard = TerminalGuard::acquire(Box::new(term.clone()));
        guard.hide_cursor();
        guard.release();
        guard.release();
        drop(guard);
        assert_eq!(term.calls(), vec!["raw_on", "hide", "show", "raw_off"]);
    }

    #[test]
    fn drop_restores_when_never_released() {
        let term = RecordingTerminal {
            raw_supported: true,
            ..Default::default()
        };
        {
            let mut guard = TerminalGuard::acquire(Box::new(term.clone()));
            guard.hide_cursor();
        }
        assert_eq!(term.calls(), vec!["raw_on", "hide", "show", "raw_off"]);
    }

    #[test]
    fn unsupported_raw_mode_is_not_disabled() {
        let term = RecordingTerminal::default();
        let guard = TerminalGuard::acquire(Box::new(term.clone()));
        assert!(!guard.raw_enabled());
        drop(guard);
        assert_eq!(term.calls(), vec!["raw_on"]);
    }

    #[test]
    fn guard_restores_during_unwinding() {
        let term = RecordingTerminal {
            raw_supported: true,
            ..Default::default()
        };
        let inner = term.clone();
        let result = std::panic::catch_unwind(move || {
            let mut guard = TerminalGuard::acquire(Box::new(inner));
            guard.hide_cursor();
            panic!("tick blew up");
        });
        assert!(result.is_err());
        assert_eq!(term.calls(), vec!["raw_on", "hide", "show", "raw_off"]);
    }
}
