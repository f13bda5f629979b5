//! Directive comment extraction.
//!
//! A text-format file names its own schema through a contiguous block of
//! comment lines at the very top of the file:
//!
//! ```text
//! # proto-file: path/to/schema.proto
//! # proto-message: pkg.MessageName
//! ```
//!
//! # Rules
//!
//! - The header block ends at the first line that, once trimmed, does not
//!   start with `#`. A blank line ends it too.
//! - A directive line splits on whitespace into exactly three fields
//!   `[marker, key, value]`. Lines with any other field count are ordinary
//!   comments and are skipped.
//! - Each key may appear once. Line numbers in errors are zero-based.

use tracing::trace;

use crate::error::HeaderError;

/// Prefix that marks a header comment line.
pub const COMMENT_MARKER: &str = "#";

/// Directive key naming the schema file.
pub const PROTO_FILE_KEY: &str = "proto-file:";

/// Directive key naming the message type.
pub const PROTO_MESSAGE_KEY: &str = "proto-message:";

/// Schema path and message type named by an input's header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDirectives {
    /// Schema file, resolved against the import roots.
    pub proto_file: String,
    /// Simple or package-qualified message type name.
    pub proto_message: String,
}

/// Extract the `proto-file:` and `proto-message:` directives from `input`.
///
/// # Errors
///
/// Returns a duplicate error as soon as a key is seen twice, otherwise a
/// missing error for the first key still unset once the header block ends.
pub fn extract_headers(input: &[u8]) -> Result<HeaderDirectives, HeaderError> {
    let mut proto_file: Option<String> = None;
    let mut proto_message: Option<String> = None;

    for (line, raw) in input.split(|&byte| byte == b'\n').enumerate() {
        let text = String::from_utf8_lossy(raw);
        let text = text.trim();
        if !text.starts_with(COMMENT_MARKER) {
            break;
        }
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [_, key, value] = fields.as_slice() else {
            continue;
        };
        match *key {
            PROTO_FILE_KEY => {
                set_once(&mut proto_file, value, || HeaderError::DuplicateProtoFile {
                    line,
                })?;
            }
            PROTO_MESSAGE_KEY => {
                set_once(&mut proto_message, value, || {
                    HeaderError::DuplicateProtoMessage { line }
                })?;
            }
            _ => {}
        }
        trace!(line, key = *key, value = *value, "header directive line");
    }

    let proto_file = proto_file.ok_or(HeaderError::MissingProtoFile)?;
    let proto_message = proto_message.ok_or(HeaderError::MissingProtoMessage)?;
    Ok(HeaderDirectives {
        proto_file,
        proto_message,
    })
}

fn set_once(
    slot: &mut Option<String>,
    value: &str,
    duplicate: impl FnOnce() -> HeaderError,
) -> Result<(), HeaderError> {
    if slot.is_some() {
        return Err(duplicate());
    }
    *slot = Some(value.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(input: &str) -> Result<HeaderDirectives, HeaderError> {
        extract_headers(input.as_bytes())
    }

    #[test]
    fn test_extracts_both_directives() {
        let headers = extract("# proto-file: valid.proto\n# proto-message: Example\n\nname: \"x\"")
            .unwrap();
        assert_eq!(headers.proto_file, "valid.proto");
        assert_eq!(headers.proto_message, "Example");
    }

    #[test]
    fn test_directive_order_does_not_matter() {
        let headers = extract("# proto-message: foo.Bar\n# proto-file: foo.proto\n").unwrap();
        assert_eq!(headers.proto_file, "foo.proto");
        assert_eq!(headers.proto_message, "foo.Bar");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let headers =
            extract("   #   proto-file:\tvalid.proto  \r\n\t# proto-message:   Example\r\n")
                .unwrap();
        assert_eq!(headers.proto_file, "valid.proto");
        assert_eq!(headers.proto_message, "Example");
    }

    #[test]
    fn test_other_comments_are_skipped() {
        let input = "# Copyright notice for this file.\n\
                     #\n\
                     # proto-file: valid.proto\n\
                     # note: ignored\n\
                     # proto-message: Example\n";
        let headers = extract(input).unwrap();
        assert_eq!(headers.proto_file, "valid.proto");
        assert_eq!(headers.proto_message, "Example");
    }

    #[test]
    fn test_missing_proto_file() {
        assert_eq!(
            extract("# proto-message: Example\n\n"),
            Err(HeaderError::MissingProtoFile)
        );
    }

    #[test]
    fn test_missing_proto_message() {
        assert_eq!(
            extract("# proto-file: valid.proto\n\n"),
            Err(HeaderError::MissingProtoMessage)
        );
    }

    #[test]
    fn test_missing_both_reports_proto_file_first() {
        assert_eq!(extract(""), Err(HeaderError::MissingProtoFile));
    }

    #[test]
    fn test_leading_blank_lines_hide_directives() {
        assert_eq!(
            extract("\n\n# proto-file: valid.proto\n# proto-message: Example\n\n"),
            Err(HeaderError::MissingProtoFile)
        );
    }

    #[test]
    fn test_blank_line_ends_header_block() {
        assert_eq!(
            extract("# proto-file: valid.proto\n\n# proto-message: Example\n"),
            Err(HeaderError::MissingProtoMessage)
        );
    }

    #[test]
    fn test_body_line_ends_header_block() {
        assert_eq!(
            extract("# proto-file: valid.proto\nname: \"x\"\n# proto-message: Example\n"),
            Err(HeaderError::MissingProtoMessage)
        );
    }

    #[test]
    fn test_trailing_token_disqualifies_directive() {
        assert_eq!(
            extract("# proto-file: valid.proto junk\n# proto-message: Example\n\n"),
            Err(HeaderError::MissingProtoFile)
        );
    }

    #[test]
    fn test_duplicate_proto_file() {
        assert_eq!(
            extract("# proto-file: valid.proto\n# proto-file: valid.proto\n# proto-message: Example\n\n"),
            Err(HeaderError::DuplicateProtoFile { line: 1 })
        );
    }

    #[test]
    fn test_duplicate_proto_message() {
        assert_eq!(
            extract("# proto-file: valid.proto\n# proto-message: Example\n# proto-message: Example\n\n"),
            Err(HeaderError::DuplicateProtoMessage { line: 2 })
        );
    }

    #[test]
    fn test_duplicate_after_header_is_not_seen() {
        let headers = extract(
            "# proto-file: valid.proto\n# proto-message: Example\n\n# proto-message: Other\n",
        )
        .unwrap();
        assert_eq!(headers.proto_message, "Example");
    }

    #[test]
    fn test_marker_field_is_not_compared() {
        let headers = extract("## proto-file: valid.proto\n#! proto-message: Example\n").unwrap();
        assert_eq!(headers.proto_file, "valid.proto");
        assert_eq!(headers.proto_message, "Example");
    }

    #[test]
    fn test_invalid_utf8_in_comment_is_tolerated() {
        let mut input = b"# \xff\xfe\n".to_vec();
        input.extend_from_slice(b"# proto-file: valid.proto\n# proto-message: Example\n");
        let headers = extract_headers(&input).unwrap();
        assert_eq!(headers.proto_file, "valid.proto");
    }
}
