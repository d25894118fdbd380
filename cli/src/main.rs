mod cli;
mod filter;

use cli::Cli;
use tracing::Level;

/// Map the `-v` count onto a max log level (warnings are always shown).
fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    filter::run(&cli)
}

fn main() -> anyhow::Result<()> { run() }
