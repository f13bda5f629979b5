//! Validation of self-describing protobuf text-format files.
//!
//! An input names its own schema and message type in leading comments:
//!
//! ```text
//! # proto-file: protos/example.proto
//! # proto-message: example.Example
//!
//! name: "example"
//! ```
//!
//! [`Validator`] reads the input, extracts those directives, compiles the
//! schema with `protox` and decodes the body with `prost-reflect`. All file
//! reads go through a [`FileAccess`] so runs can be served from memory.
//!
//! ```ignore
//! use txtpb_validate::{OsFileAccess, Validator, ValidatorOptions};
//!
//! let options = ValidatorOptions::default().with_import_path("protos");
//! let validated = Validator::with_options(OsFileAccess, options).validate("input.textproto")?;
//! println!("{}", validated.message_name());
//! ```

pub mod error;
pub mod fs;
pub mod header;
pub mod options;
pub mod resolve;
pub mod validator;

pub use error::{DecodeError, HeaderError, ResolveError, Result, Stage, ValidateError};
pub use fs::{FileAccess, MemoryFileAccess, OsFileAccess};
pub use header::{HeaderDirectives, extract_headers};
pub use options::{DEFAULT_IMPORT_PATH, ValidatorOptions};
pub use resolve::{ImportResolver, resolve_message};
pub use validator::{ValidatedMessage, Validator, validate};
