//! qrstyler - styled QR code generator CLI.

use std::process;

use clap::Parser;
use tracing::debug;

use qrstyler::cli::Cli;
use qrstyler::config::{self, FileConfig};
use qrstyler::context::GeneratorContext;
use qrstyler::generator;
use qrstyler::logging::{self, LogOptions};
use qrstyler::{GenerateError, GenerationRequest};

fn main() {
    let cli = Cli::parse();

    let code = {
        let logging = logging::init(&LogOptions { file: cli.log_file.clone(), verbose: cli.verbose });
        if let Some(path) = logging.file() {
            debug!(log_file = %path.display(), "logging initialized");
        }
        match run(&cli) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        }
    };

    process::exit(code);
}

fn run(cli: &Cli) -> Result<(), GenerateError> {
    // Load config
    let file_config = match config::discover_config_path(cli.config.as_deref()) {
        Some(path) => {
            if cli.verbose {
                eprintln!("Config: {}", path.display());
            }
            Some(FileConfig::load(&path).map_err(|e| {
                tracing::error!(error = %e, "failed to load config");
                GenerateError::Config(e)
            })?)
        }
        None => None,
    };

    let request = GenerationRequest::from_sources(cli, file_config);
    let ctx = GeneratorContext::from_cli(cli);

    let path = generator::generate(&ctx, &request)?;
    eprintln!("Saved: {}", path.display());
    Ok(())
}
