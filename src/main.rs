//! Binary entrypoint for the `redirect-source` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match redirect_source::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
