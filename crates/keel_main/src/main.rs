use std::io::Write;

use anyhow::Result;
use clap::Parser;
use keel_api::{BackendKind, Config, Filesystem};
use keel_main::{init_tracing, run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose)?;

    let mut config = Config::from_env()?;
    if cli.memory {
        config = config.backend(BackendKind::Memory);
    }
    tracing::debug!(backend = %config.backend, current_dir = %config.current_dir.display(), "Configuration loaded");

    let fs = Filesystem::from_config(&config);
    let mut stdout = std::io::stdout().lock();
    run(&fs, cli.command, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
