//! Validator configuration.

use std::path::PathBuf;

/// Import root used when none is configured.
pub const DEFAULT_IMPORT_PATH: &str = ".";

/// Options for a [`crate::Validator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Directories searched, in order, for the schema file and its imports.
    pub import_paths: Vec<PathBuf>,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            import_paths: vec![PathBuf::from(DEFAULT_IMPORT_PATH)],
        }
    }
}

impl ValidatorOptions {
    /// Append an import root after the existing ones.
    #[must_use]
    pub fn with_import_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.import_paths.push(path.into());
        self
    }

    /// Replace the import roots.
    #[must_use]
    pub fn with_import_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.import_paths = paths.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_searches_current_dir() {
        let options = ValidatorOptions::default();
        assert_eq!(options.import_paths, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_with_import_path_appends() {
        let options = ValidatorOptions::default()
            .with_import_path("protos")
            .with_import_path("vendor");
        assert_eq!(
            options.import_paths,
            vec![
                PathBuf::from("."),
                PathBuf::from("protos"),
                PathBuf::from("vendor")
            ]
        );
    }

    #[test]
    fn test_with_import_paths_replaces() {
        let options = ValidatorOptions::default().with_import_paths(["a", "b"]);
        assert_eq!(
            options.import_paths,
            vec![PathBuf::from("a"), PathBuf::from("b")]
        );
    }
}
