//! File-access capability.
//!
//! Validation never touches the filesystem directly: the input file and every
//! schema file (including imports) are read through a [`FileAccess`]
//! implementation. [`OsFileAccess`] reads real files, [`MemoryFileAccess`]
//! serves a fixed map of paths for tests and sandboxed runs.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Component, Path, PathBuf};

/// Read access to a backing store of files.
///
/// Both operations fail with [`io::ErrorKind::NotFound`] when the path is
/// absent; the schema resolver relies on that kind to move on to the next
/// import root.
pub trait FileAccess: Send + Sync {
    /// Read the entire contents of `path`.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Open `path` for streamed reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;
}

/// [`FileAccess`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileAccess;

impl FileAccess for OsFileAccess {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// In-memory [`FileAccess`] keyed by normalized path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileAccess {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFileAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous contents.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        self.files
            .insert(normalize(path.as_ref()), contents.into());
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(&normalize(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn get(&self, path: &Path) -> io::Result<&[u8]> {
        self.files
            .get(&normalize(path))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unknown file {}", path.display()),
                )
            })
    }
}

impl<P, C> FromIterator<(P, C)> for MemoryFileAccess
where
    P: AsRef<Path>,
    C: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut access = Self::new();
        for (path, contents) in iter {
            access.insert(path, contents);
        }
        access
    }
}

impl FileAccess for MemoryFileAccess {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.get(path).map(<[u8]>::to_vec)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let contents = self.get(path)?;
        Ok(Box::new(Cursor::new(contents)))
    }
}

/// Drop `.` components so `./a/b.proto` and `a/b.proto` name the same file.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_read_and_open() {
        let access = MemoryFileAccess::new().with_file("a.proto", "syntax = \"proto3\";");

        assert_eq!(
            access.read_file(Path::new("a.proto")).unwrap(),
            b"syntax = \"proto3\";"
        );

        let mut text = String::new();
        access
            .open(Path::new("a.proto"))
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "syntax = \"proto3\";");
    }

    #[test]
    fn test_memory_unknown_file() {
        let access = MemoryFileAccess::new();
        let err = access.read_file(Path::new("input.textproto")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "unknown file input.textproto");

        let err = access.open(Path::new("missing.proto")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_ignores_current_dir_components() {
        let access: MemoryFileAccess = [("./protos/./a.proto", "x")].into_iter().collect();
        assert!(access.contains("protos/a.proto"));
        assert!(access.read_file(Path::new("./protos/a.proto")).is_ok());
        assert_eq!(access.len(), 1);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("./a/b.proto")), PathBuf::from("a/b.proto"));
        assert_eq!(normalize(Path::new("a/./b.proto")), PathBuf::from("a/b.proto"));
        assert_eq!(normalize(Path::new("../b.proto")), PathBuf::from("../b.proto"));
    }

    #[test]
    fn test_os_missing_file_is_not_found() {
        let err = OsFileAccess
            .read_file(Path::new("definitely/not/here.textproto"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
