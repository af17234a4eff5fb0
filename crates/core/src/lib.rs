//! Core types for filewatch
//!
//! This crate provides:
//! - The closed set of change kinds and their integer codes
//! - Raw and typed change events
//! - The watch request (paths plus passthrough backup destination)
//! - The shared error type

pub mod error;
pub mod event;
pub mod request;

// Re-exports
pub use error::{Error, Result};
pub use event::{ChangeEvent, EventKind, RawChange};
pub use request::WatchRequest;
