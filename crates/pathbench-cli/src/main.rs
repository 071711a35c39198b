//! `pathbench` binary entrypoint.

use clap::Parser;
use pathbench_cli::{CliArgs, PathbenchCli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let result = PathbenchCli::from_args("pathbench", &args).and_then(|cli| cli.run(args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
