use std::io;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cancel::CancelFlag;

/// Sets `cancel` on the first SIGINT, SIGTERM or SIGHUP. Handlers are
/// registered before this returns.
#[cfg(unix)]
pub fn listen_for_shutdown(cancel: CancelFlag) -> io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        let name = tokio::select! {
            _ = interrupt.recv() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
            _ = hangup.recv() => "SIGHUP",
        };
        info!(signal = name, "shutdown signal received");
        cancel.cancel();
    }))
}

#[cfg(not(unix))]
pub fn listen_for_shutdown(cancel: CancelFlag) -> io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(signal = "ctrl-c", "shutdown signal received");
            cancel.cancel();
        }
    }))
}
