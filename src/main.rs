use std::process::ExitCode;

mod artifacts;
mod audit;
mod catalog;
mod cli;
mod config;
mod covers;
mod error;
mod library;
mod reconcile;
mod runtime;

use runtime::Outcome;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Discrepancies) => ExitCode::from(1),
        Err(e) => {
            eprintln!("shelfcheck: {e}");
            ExitCode::from(2)
        }
    }
}
