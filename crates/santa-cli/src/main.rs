use std::error::Error;
use std::io;

use clap::{Parser, Subcommand};
use santa_cli::commands::{
    assign::{self, AssignArgs},
    check::{self, CheckArgs},
};
use santa_cli::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "santa", about = "K-regular secret gift assignment")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assign gifts for a roster and print the pairs (and rendered messages).
    Assign(AssignArgs),
    /// Validate a roster against a gift count without assigning.
    Check(CheckArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(&cli.log_level) {
        eprintln!("failed to initialise logging: {err}");
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Assign(args) => assign::run(args, &mut out),
        Command::Check(args) => check::run(args, &mut out),
    }
}
