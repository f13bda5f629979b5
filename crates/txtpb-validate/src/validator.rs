//! Validation pipeline.
//!
//! A run is four fallible steps, each depending on the previous one:
//!
//! 1. read the input bytes through the [`FileAccess`] capability;
//! 2. extract the header directives;
//! 3. compile the schema and resolve the message type;
//! 4. decode the whole input as text format into the resolved message.
//!
//! The first failure ends the run with an error tagged by its [`Stage`].
//!
//! [`Stage`]: crate::Stage

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prost_reflect::{DynamicMessage, MessageDescriptor, ReflectMessage};
use tracing::{debug, info_span, warn};

use crate::error::{Result, ValidateError};
use crate::fs::FileAccess;
use crate::header::{HeaderDirectives, extract_headers};
use crate::options::ValidatorOptions;
use crate::resolve::resolve_message;

/// A successfully validated input.
#[derive(Debug, Clone)]
pub struct ValidatedMessage {
    /// Path of the validated input.
    pub input: PathBuf,
    /// Directives taken from the input's header block.
    pub headers: HeaderDirectives,
    /// Descriptor of the resolved message type.
    pub descriptor: MessageDescriptor,
    /// The decoded message.
    pub message: DynamicMessage,
}

impl ValidatedMessage {
    /// Package-qualified name of the resolved message type.
    pub fn message_name(&self) -> &str {
        self.descriptor.full_name()
    }

    /// Number of top-level fields set by the input.
    pub fn populated_fields(&self) -> usize {
        self.message.fields().count()
    }
}

/// Validates self-describing text-format files.
#[derive(Clone)]
pub struct Validator {
    access: Arc<dyn FileAccess>,
    options: ValidatorOptions,
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Validator {
    /// Create a validator with default options.
    pub fn new(access: impl FileAccess + 'static) -> Self {
        Self::with_options(access, ValidatorOptions::default())
    }

    pub fn with_options(access: impl FileAccess + 'static, options: ValidatorOptions) -> Self {
        Self {
            access: Arc::new(access),
            options,
        }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate the text-format file at `input`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails; see [`ValidateError`].
    pub fn validate(&self, input: impl AsRef<Path>) -> Result<ValidatedMessage> {
        let input = input.as_ref();
        let span = info_span!("validate", input = %input.display());
        let _guard = span.enter();

        let result = self.run(input);
        if let Err(error) = &result {
            warn!(stage = %error.stage(), %error, "validation failed");
        }
        result
    }

    fn run(&self, input: &Path) -> Result<ValidatedMessage> {
        let bytes = self
            .access
            .read_file(input)
            .map_err(|source| ValidateError::read(input, source))?;
        debug!(bytes = bytes.len(), "read input");

        let headers = extract_headers(&bytes)?;
        debug!(
            proto_file = %headers.proto_file,
            proto_message = %headers.proto_message,
            "extracted header directives"
        );

        let mut message = resolve_message(
            Arc::clone(&self.access),
            &self.options.import_paths,
            &headers.proto_file,
            &headers.proto_message,
        )
        .map_err(|source| {
            ValidateError::resolve(&headers.proto_message, &headers.proto_file, source)
        })?;

        let text = std::str::from_utf8(&bytes).map_err(ValidateError::decode)?;
        message
            .merge_text_format(text)
            .map_err(ValidateError::decode)?;
        debug!(fields = message.fields().count(), "decoded text format");

        Ok(ValidatedMessage {
            input: input.to_path_buf(),
            headers,
            descriptor: message.descriptor(),
            message,
        })
    }
}

/// Validate `input` with default options.
///
/// # Errors
///
/// See [`Validator::validate`].
pub fn validate(
    access: impl FileAccess + 'static,
    input: impl AsRef<Path>,
) -> Result<ValidatedMessage> {
    Validator::new(access).validate(input)
}
