//! CLI argument definitions for the text-format validator.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use txtpb_validate::ValidatorOptions;

#[derive(Parser)]
#[command(
    name = "textproto-validator",
    version,
    about = "Validate protobuf text-format files against the schema they name",
    long_about = "Validate protobuf text-format files against the schema they name.\n\n\
                  The input must start with two comment directives:\n\n  \
                  # proto-file: <path/to/schema.proto>\n  \
                  # proto-message: <MessageName>\n\n\
                  The schema is compiled from the import paths and the body is decoded\n\
                  as an instance of the named message."
)]
pub struct Cli {
    /// Text-format file to validate.
    #[arg(value_name = "TEXTPROTO")]
    pub input: PathBuf,

    /// Directory in which to search for proto imports. May be repeated.
    ///
    /// Directories are searched after the current directory, in the order given.
    #[arg(short = 'I', long = "import-path", value_name = "DIR")]
    pub import_paths: Vec<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Validator options implied by the import path flags.
    pub fn validator_options(&self) -> ValidatorOptions {
        self.import_paths
            .iter()
            .fold(ValidatorOptions::default(), |options, path| {
                options.with_import_path(path.clone())
            })
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
