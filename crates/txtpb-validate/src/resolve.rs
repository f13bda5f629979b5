//! Message type resolution.
//!
//! Compiles the schema named by the header with `protox`, reading the schema
//! and its imports through the caller's [`FileAccess`], then looks the message
//! type up among the compiled file's top-level messages.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use prost_reflect::{DynamicMessage, MessageDescriptor};
use protox::Compiler;
use protox::file::{File, FileResolver, GoogleFileResolver};
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::fs::{FileAccess, normalize};

/// [`FileResolver`] that searches import roots in order through a
/// [`FileAccess`].
///
/// Names not found under any root fall back to the well-known
/// `google/protobuf/*.proto` files bundled with the compiler.
pub struct ImportResolver {
    access: Arc<dyn FileAccess>,
    import_paths: Vec<PathBuf>,
    well_known: GoogleFileResolver,
}

impl ImportResolver {
    pub fn new(access: Arc<dyn FileAccess>, import_paths: &[PathBuf]) -> Self {
        Self {
            access,
            import_paths: import_paths.to_vec(),
            well_known: GoogleFileResolver::new(),
        }
    }

    fn read_source(&self, path: &Path) -> io::Result<String> {
        let mut reader = self.access.open(path)?;
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(source)
    }
}

impl FileResolver for ImportResolver {
    fn open_file(&self, name: &str) -> Result<File, protox::Error> {
        for root in &self.import_paths {
            let path = normalize(&root.join(name));
            match self.read_source(&path) {
                Ok(source) => {
                    trace!(name, path = %path.display(), "opened schema file");
                    return File::from_source(name, &source);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(protox::Error::new(err)),
            }
        }
        self.well_known.open_file(name)
    }
}

/// Compile `schema_path` and return an empty message of type `message_name`.
///
/// `message_name` matches either the simple name or the package-qualified
/// full name of a top-level message declared in the schema file.
///
/// # Errors
///
/// [`ResolveError::Compile`] when the schema or one of its imports fails to
/// compile, [`ResolveError::MessageNotFound`] when no top-level message of
/// the schema file itself matches.
pub fn resolve_message(
    access: Arc<dyn FileAccess>,
    import_paths: &[PathBuf],
    schema_path: &str,
    message_name: &str,
) -> Result<DynamicMessage, ResolveError> {
    let mut compiler = Compiler::with_file_resolver(ImportResolver::new(access, import_paths));
    compiler
        .open_file(schema_path)
        .map_err(ResolveError::Compile)?;

    // Only the opened schema is searched; imported files never match.
    let pool = compiler.descriptor_pool();
    let descriptor = compiler
        .files()
        .filter(|file| !file.is_import())
        .filter_map(|file| pool.get_file_by_name(file.name()))
        .find_map(|file| find_top_level_message(file.messages(), message_name))
        .ok_or(ResolveError::MessageNotFound)?;
    debug!(
        schema = schema_path,
        message = descriptor.full_name(),
        "resolved message type"
    );
    Ok(DynamicMessage::new(descriptor))
}

fn find_top_level_message(
    mut messages: impl Iterator<Item = MessageDescriptor>,
    name: &str,
) -> Option<MessageDescriptor> {
    messages.find(|message| message.name() == name || message.full_name() == name)
}
