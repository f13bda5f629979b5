//! Runs a validation against the real filesystem.

use std::time::Instant;

use tracing::info;
use txtpb_validate::{OsFileAccess, ValidateError, ValidatedMessage, Validator};

use crate::cli::Cli;

/// Validate the input named on the command line against the real filesystem.
pub fn run_validate(cli: &Cli) -> Result<ValidatedMessage, ValidateError> {
    let options = cli.validator_options();
    info!(
        input = %cli.input.display(),
        import_paths = ?options.import_paths,
        "validating"
    );
    let start = Instant::now();
    let result = Validator::with_options(OsFileAccess, options).validate(&cli.input);
    info!(
        duration_ms = start.elapsed().as_millis(),
        ok = result.is_ok(),
        "validation finished"
    );
    result
}
