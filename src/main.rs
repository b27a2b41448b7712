//! triage - rank tasks by priority and flag circular dependencies

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = triage_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
