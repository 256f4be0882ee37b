use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use gambit_play::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so the game transcript on stdout stays clean.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let options = Cli::parse().into_options()?;
    info!(
        white = %options.white,
        black = %options.black,
        max_time_ms = options.search.max_time.as_millis() as u64,
        "gambit starting"
    );

    let mut game_match = options.build()?;
    let outcome = game_match.run(&mut io::stdout().lock())?;
    info!(?outcome, "gambit finished");
    Ok(())
}
