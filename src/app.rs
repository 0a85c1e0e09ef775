use std::io::{self, Write};
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::Report;
use tracing::{info, warn};

use crate::cancel::CancelFlag;
use crate::system::sampler::Sampler;
use crate::system::source::PlatformSource;
use crate::terminal::TerminalGuard;
use crate::ui;

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// Gap between the sampler's baseline reading and the first tick.
pub const WARMUP: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopping,
    Stopped,
}

pub struct RefreshLoop<S, W> {
    sampler: Sampler<S>,
    terminal: TerminalGuard,
    out: W,
    cancel: CancelFlag,
    state: LoopState,
    ticks: u64,
}

impl<S: PlatformSource, W: Write> RefreshLoop<S, W> {
    pub fn new(sampler: Sampler<S>, terminal: TerminalGuard, out: W, cancel: CancelFlag) -> Self {
        RefreshLoop {
            sampler,
            terminal,
            out,
            cancel,
            state: LoopState::Running,
            ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn terminal(&self) -> &TerminalGuard {
        &self.terminal
    }

    /// Runs until cancelled. The flag is checked before each tick's sampling,
    /// which also makes it the check that follows every sleep.
    pub async fn run(&mut self) {
        self.terminal.hide_cursor();
        tokio::time::sleep(WARMUP).await;

        while !self.cancel.is_cancelled() {
            if let Err(err) = self.tick() {
                self.report(&err);
            }
            self.ticks += 1;
            tokio::time::sleep(REFRESH_INTERVAL).await;
        }

        self.state = LoopState::Stopping;
        self.terminal.release();
        self.state = LoopState::Stopped;
        info!(ticks = self.ticks, "refresh loop stopped");
    }

    fn tick(&mut self) -> Result<()> {
        let snapshot = self.sampler.sample()?;
        let screen = ui::render(&snapshot)?;
        self.terminal.clear_screen();
        self.draw(&screen)?;
        Ok(())
    }

    /// Writes with `\r\n` endings so lines start at column 0 in raw mode too.
    fn draw(&mut self, screen: &str) -> io::Result<()> {
        for line in screen.lines() {
            write!(self.out, "{line}\r\n")?;
        }
        self.out.flush()
    }

    fn report(&mut self, err: &Report) {
        warn!("tick failed: {err:#}");
        self.terminal.clear_screen();
        let line = format!("Error while updating monitor: {err:#}");
        if let Err(write_err) = self.draw(&line) {
            warn!(%write_err, "could not draw the error line");
        }
    }
}
