//! Error types for text-format validation.
//!
//! Every failure is attributed to the [`Stage`] that produced it. Lower-level
//! causes are kept as error sources; only context text is added on top.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage that produced a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the input file.
    Read,
    /// Extracting the directive comments.
    Header,
    /// Compiling the schema and locating the message type.
    Resolve,
    /// Decoding the text-format body.
    Decode,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Header => "header",
            Self::Resolve => "resolve",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors in the directive comment block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("could not find proto-file comment")]
    MissingProtoFile,

    #[error("could not find proto-message comment")]
    MissingProtoMessage,

    /// Second `proto-file:` directive; `line` is zero-based.
    #[error("duplicate proto-file at line {line}")]
    DuplicateProtoFile { line: usize },

    /// Second `proto-message:` directive; `line` is zero-based.
    #[error("duplicate proto-message at line {line}")]
    DuplicateProtoMessage { line: usize },
}

/// Errors while compiling the schema or locating the message type.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The schema compiler rejected the schema or one of its imports.
    #[error("{}", describe_compile_error(.0))]
    Compile(#[source] protox::Error),

    #[error("message not found")]
    MessageNotFound,
}

/// Errors while decoding the text-format body.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Text(#[from] prost_reflect::text_format::ParseError),
}

/// A failed validation run.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The input file could not be read. Reported as-is.
    #[error("{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error("failed to find message {message} in {schema}: {source}")]
    Resolve {
        message: String,
        schema: String,
        #[source]
        source: ResolveError,
    },

    #[error("unmarshal failure: {source}")]
    Decode {
        #[source]
        source: DecodeError,
    },
}

/// Result type alias for validation runs.
pub type Result<T> = std::result::Result<T, ValidateError>;

impl ValidateError {
    /// Create a Read error.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a Resolve error carrying the directive values as context.
    pub fn resolve(
        message: impl Into<String>,
        schema: impl Into<String>,
        source: ResolveError,
    ) -> Self {
        Self::Resolve {
            message: message.into(),
            schema: schema.into(),
            source,
        }
    }

    /// Create a Decode error.
    pub fn decode(source: impl Into<DecodeError>) -> Self {
        Self::Decode {
            source: source.into(),
        }
    }

    /// Stage of the pipeline that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Read { .. } => Stage::Read,
            Self::Header(_) => Stage::Header,
            Self::Resolve { .. } => Stage::Resolve,
            Self::Decode { .. } => Stage::Decode,
        }
    }
}

// The compiler's Debug output carries the `file:line:column:` prefix.
fn describe_compile_error(err: &protox::Error) -> String {
    if err.is_parse() {
        format!("syntax error: {err:?}")
    } else {
        format!("{err:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_error_display() {
        assert_eq!(
            HeaderError::MissingProtoFile.to_string(),
            "could not find proto-file comment"
        );
        assert_eq!(
            HeaderError::DuplicateProtoMessage { line: 2 }.to_string(),
            "duplicate proto-message at line 2"
        );
    }

    #[test]
    fn test_resolve_error_wraps_cause() {
        let err = ValidateError::resolve("Missing", "valid.proto", ResolveError::MessageNotFound);
        assert_eq!(
            err.to_string(),
            "failed to find message Missing in valid.proto: message not found"
        );
        assert_eq!(err.stage(), Stage::Resolve);
    }

    #[test]
    fn test_read_error_is_reported_as_is() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "unknown file input.textproto");
        let err = ValidateError::read("input.textproto", io_err);
        assert_eq!(err.to_string(), "unknown file input.textproto");
        assert_eq!(err.stage(), Stage::Read);
    }

    #[test]
    fn test_header_error_conversion() {
        let err: ValidateError = HeaderError::MissingProtoMessage.into();
        assert!(matches!(err, ValidateError::Header(_)));
        assert_eq!(err.stage().to_string(), "header");
    }
}
