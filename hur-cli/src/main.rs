//! hur-cli - Command line tool for HURDAT2 storm tracks and wind fields.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hur-cli",
    version,
    about = "HURDAT2 storm-track wind-field toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: hur_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("hur-cli starting");
    hur_cmd::run(cli.command)
}
