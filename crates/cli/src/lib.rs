//! Library side of the `filewatch` binary
//!
//! Configuration loading, process-wide logging setup, and the shell
//! command handlers wired into the dispatch table.

pub mod config;
pub mod handlers;
pub mod logging;
