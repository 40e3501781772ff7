use clap::Parser;
use pipsim::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
