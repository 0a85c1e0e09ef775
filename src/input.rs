use std::io::{self, ErrorKind, Read};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::cancel::CancelFlag;

pub const EOF_BACKOFF: Duration = Duration::from_millis(100);

/// Byte a raw-mode terminal delivers for Ctrl-C instead of raising SIGINT.
const CTRL_C: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    QuitRequested,
    Cancelled,
    ReadFailed,
}

pub fn is_quit_key(byte: u8) -> bool {
    matches!(byte, b'q' | b'Q' | CTRL_C)
}

pub struct InputWatcher<R> {
    reader: R,
    cancel: CancelFlag,
    backoff: Duration,
}

impl<R: Read> InputWatcher<R> {
    pub fn new(reader: R, cancel: CancelFlag) -> Self {
        Self {
            reader,
            cancel,
            backoff: EOF_BACKOFF,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn run(mut self) -> WatchOutcome {
        let mut byte = [0u8; 1];
        while !self.cancel.is_cancelled() {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    // Closed or empty stdin is not a quit request.
                    thread::sleep(self.backoff);
                }
                Ok(_) if is_quit_key(byte[0]) => {
                    debug!(key = byte[0], "quit key pressed");
                    self.cancel.cancel();
                    return WatchOutcome::QuitRequested;
                }
                Ok(_) => {}
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    debug!(%err, "input watcher stopped, quit key disabled");
                    return WatchOutcome::ReadFailed;
                }
            }
        }
        WatchOutcome::Cancelled
    }
}

/// Starts watching stdin on a background thread.
///
/// The thread is never joined: it may stay blocked in `read` until the
/// process exits.
pub fn spawn_stdin_watcher(cancel: CancelFlag) -> io::Result<JoinHandle<WatchOutcome>> {
    thread::Builder::new()
        .name("input-watcher".into())
        .spawn(move || InputWatcher::new(io::stdin(), cancel).run())
}
