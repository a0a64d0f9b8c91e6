//! TaskFlow - local-first gamified task management

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = taskflow_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
