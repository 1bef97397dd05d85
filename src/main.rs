use std::io;
use std::process::ExitCode;

use log::{error, info};
use topia_common::RunMode;

// Define modules used by main
mod cli;
mod display;
mod driver;
mod simulation;

use display::{AppendSink, TerminalSink};
use driver::Driver;

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::init();

    let config = match cli::parse_from(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => {
            eprint!("{}", err.message());
            return ExitCode::from(err.exit_code());
        }
    };

    info!("Starting brace-topia with {}", config);
    info!("Run mode: {:?}", config.mode());

    // Bounded runs append plain frames; continuous runs redraw in place.
    let result = match config.mode() {
        RunMode::Bounded { .. } => Driver::new(config, AppendSink::new(io::stdout().lock())).run(),
        RunMode::Continuous { .. } => Driver::new(config, TerminalSink::new(io::stdout())).run(),
    };

    match result {
        Ok(()) => {
            info!("Simulation complete.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Simulation stopped: {:#}", e);
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
