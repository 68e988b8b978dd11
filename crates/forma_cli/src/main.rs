//! forma CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Schema validation failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use forma_template::TemplateError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "forma=debug"
    } else if cli.quiet {
        "forma=error"
    } else {
        "forma=info"
    };
    let mut filter = EnvFilter::from_default_env();
    for directive in [level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logging may already be initialized; keep going either way.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let result = match cli.command {
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Convert(args) => commands::convert::execute(args),
        Commands::Resources(args) => commands::resources::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(error) = cause.downcast_ref::<TemplateError>() {
            return match error {
                TemplateError::Schema { .. } | TemplateError::Policy { .. } => {
                    ExitCodes::VALIDATION_FAILURE
                }
                TemplateError::NotFound { .. } | TemplateError::UnsupportedFormat(_) => {
                    ExitCodes::INVALID_ARGS
                }
                TemplateError::Json(_) | TemplateError::Yaml(_) => ExitCodes::TEMPLATE_ERROR,
                TemplateError::Io(_) => ExitCodes::GENERAL_ERROR,
            };
        }
    }

    let msg = format!("{:#}", e).to_lowercase();
    if msg.contains("validation") || msg.contains("schema") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("argument") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
