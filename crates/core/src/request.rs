//! What to watch

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Set of paths to observe
///
/// `backup_dest` is carried through untouched for handlers that copy
/// changed files somewhere; dispatch never reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRequest {
    paths: Vec<PathBuf>,
    backup_dest: Option<PathBuf>,
    recursive: bool,
}

impl WatchRequest {
    /// Create a recursive request for the given paths
    ///
    /// Fails with [`Error::NoPaths`] when `paths` is empty.
    pub fn new<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(Error::NoPaths);
        }

        Ok(Self {
            paths,
            backup_dest: None,
            recursive: true,
        })
    }

    pub fn with_backup_dest(mut self, dest: impl Into<PathBuf>) -> Self {
        self.backup_dest = Some(dest.into());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn backup_dest(&self) -> Option<&Path> {
        self.backup_dest.as_deref()
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }
}
