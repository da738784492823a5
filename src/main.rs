//! # Batch
//!
//! Pre-boot shell script interpreter.
//!

use batch::term;
use clap::builder::ValueHint;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "batch", version, about)]
struct Args {
    #[arg(value_name = "SCRIPT", help = "Script to run instead of the interactive prompt", value_hint = ValueHint::FilePath)]
    script: Option<PathBuf>,

    #[arg(long, default_value_t = 5000, help = "Statements run between checks for Ctrl-C")]
    cycles: usize,

    #[arg(short, long, action = ArgAction::Count, help = "More logging on stderr, repeat for more")]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    if term::main(args.script.as_deref(), args.cycles.max(1)) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
