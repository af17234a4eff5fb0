//! Change events and their integer codes

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of filesystem change
///
/// The discriminants are the integer codes used by event sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventKind {
    /// File created
    Added = 1,
    /// File content or metadata changed
    Modified = 2,
    /// File removed
    Deleted = 3,
}

impl EventKind {
    /// Every known kind, in code order
    pub const ALL: [EventKind; 3] = [EventKind::Added, EventKind::Modified, EventKind::Deleted];

    /// Integer code of this kind
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Look up a kind by its integer code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(EventKind::Added),
            2 => Some(EventKind::Modified),
            3 => Some(EventKind::Deleted),
            _ => None,
        }
    }

    /// Lowercase name, as used in logs and handler environments
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::Added => "added",
            EventKind::Modified => "modified",
            EventKind::Deleted => "deleted",
        }
    }

    /// Name of the handler slot for this kind
    pub const fn handler_name(self) -> &'static str {
        match self {
            EventKind::Added => "on_add",
            EventKind::Modified => "on_modify",
            EventKind::Deleted => "on_delete",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change as delivered by an event source, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChange {
    /// Integer event code (1 = added, 2 = modified, 3 = deleted)
    ///
    /// Any integer is representable so that out-of-range codes reach
    /// validation instead of being lost in parsing.
    pub code: i64,
    /// Path that changed
    pub path: PathBuf,
}

impl RawChange {
    pub fn new(code: i64, path: impl Into<PathBuf>) -> Self {
        Self {
            code,
            path: path.into(),
        }
    }
}

/// A validated change: one of the known kinds plus the changed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    kind: EventKind,
    path: PathBuf,
}

impl ChangeEvent {
    pub fn new(kind: EventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self::new(EventKind::Added, path)
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(EventKind::Modified, path)
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::new(EventKind::Deleted, path)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TryFrom<RawChange> for ChangeEvent {
    type Error = Error;

    fn try_from(raw: RawChange) -> Result<Self> {
        match EventKind::from_code(raw.code) {
            Some(kind) => Ok(Self::new(kind, raw.path)),
            None => Err(Error::UnknownEventKind {
                code: raw.code,
                path: raw.path,
            }),
        }
    }
}
