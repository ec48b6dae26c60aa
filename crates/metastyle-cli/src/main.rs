//! `metastyle` command-line tool.

use std::io::Write;

use clap::Parser;

mod cli;
mod commands;
mod logging;
mod output;
mod scene;

use crate::cli::{Cli, Command};
use crate::commands::{run_check, run_resolve};
use crate::logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&LogConfig::from_verbosity(cli.verbose)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Resolve { scene, format } => run_resolve(scene, *format),
        Command::Check { stylesheet } => run_check(stylesheet),
    };

    match result {
        Ok(text) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(error) = stdout.write_all(text.as_bytes()) {
                eprintln!("error: {error}");
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}
