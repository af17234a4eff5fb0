//! Workflow integration tests

pub mod replay;
pub mod watch;
