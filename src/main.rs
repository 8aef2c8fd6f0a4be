use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use cycle_statkit::{session, TripModel};

fn main() -> Result<()> {
    // Logs go to stderr so the interactive stdout stream stays clean.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let model = TripModel::new(".");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    session::run(&model, &mut input, &mut output).context("bikeshare session failed")?;
    Ok(())
}
