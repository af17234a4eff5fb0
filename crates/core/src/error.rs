//! Error types for filewatch

use crate::event::EventKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for filewatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a watch or dispatching its events
#[derive(Error, Debug)]
pub enum Error {
    /// A change carried a code outside the known vocabulary
    #[error("unknown event kind {code} for {}", .path.display())]
    UnknownEventKind { code: i64, path: PathBuf },

    /// A watch request was built without any path
    #[error("watch request needs at least one path")]
    NoPaths,

    /// A watched path does not exist when the source starts
    #[error("watched path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A recorded change line could not be parsed
    #[error("malformed change on line {line}: '{content}'")]
    MalformedChange { line: usize, content: String },

    /// A user handler returned an error
    #[error("{kind} handler failed for {}", .path.display())]
    Handler {
        kind: EventKind,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The underlying event source failed
    #[error("event source failed: {0}")]
    Source(#[source] anyhow::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error signals a mismatch between the source's event
    /// vocabulary and the dispatch table.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, Error::UnknownEventKind { .. })
    }
}
