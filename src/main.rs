use clap::Parser;
use tickersim::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
