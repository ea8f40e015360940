use std::process;
use log::error;

use codexprep::cli::build_cli;
use codexprep::commands::{CodexPrepCommandFactory, CommandFactory};
use codexprep::utils::logger::Logger;

fn main() {
    let matches = build_cli().get_matches();

    Logger::init_global_logger(matches.get_flag("verbose"));

    // Always present, clap fills in the default
    let log_file = matches.get_one::<String>("log-file");
    let logger = match log_file.map(Logger::new).unwrap_or_else(|| Ok(Logger::disabled())) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    let factory = CodexPrepCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            process::exit(1);
        }
    };
}
