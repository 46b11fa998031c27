use clap::Parser;
use tickermap::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
