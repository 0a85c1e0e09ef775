use std::io::{IsTerminal, stdout};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::{info, warn};

use hostwatch::app::RefreshLoop;
use hostwatch::cancel::CancelFlag;
use hostwatch::config::{Config, load_config, load_config_from_path};
use hostwatch::input;
use hostwatch::logging;
use hostwatch::shutdown;
use hostwatch::system::collector::SysinfoSource;
use hostwatch::system::sampler::Sampler;
use hostwatch::terminal::{self, CrosstermTerminal, NoopTerminal, TerminalControl, TerminalGuard};

#[derive(Parser)]
#[command(
    name = "hostwatch",
    about = "Live terminal dashboard for CPU, memory, disks and top processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (overrides `logging.file`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init_tracing(&config.logging)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        terminal::force_restore();
        original_hook(panic_info);
    }));

    let control: Box<dyn TerminalControl> = if stdout().is_terminal() {
        Box::new(CrosstermTerminal::new())
    } else {
        Box::new(NoopTerminal)
    };
    // Acquired before anything can fail so every exit path restores it.
    let guard = TerminalGuard::acquire(control);

    let cancel = CancelFlag::new();
    if let Err(err) = shutdown::listen_for_shutdown(cancel.clone()) {
        warn!(%err, "could not install signal handlers");
    }

    let sampler =
        Sampler::new(SysinfoSource::new()).wrap_err("cannot read platform information")?;

    if let Err(err) = input::spawn_stdin_watcher(cancel.clone()) {
        warn!(%err, "could not start the input watcher, quit with Ctrl-C");
    }

    let mut refresh = RefreshLoop::new(sampler, guard, stdout(), cancel);
    refresh.run().await;

    info!("exiting");
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref file) = cli.log_file {
        config.logging.file = Some(file.clone());
    }

    config
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use hostwatch::config::LoggingConfig;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_file_flag_overrides_config() {
        let cli = Cli::parse_from([
            "hostwatch",
            "--config",
            "/nonexistent/hostwatch.toml",
            "--log-file",
            "/tmp/hw.log",
        ]);
        let config = load_config_for_cli(&cli);
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/hw.log")));
        assert_eq!(config.logging.level, LoggingConfig::default().level);
    }
}
