//! File system watching and handler dispatch for filewatch
//!
//! This crate provides:
//! - A dispatch table routing added/modified/deleted changes to handlers
//! - Event sources: live `notify` watching, recorded replays, channels
//! - Default and configurable ignore rules
//! - A stop signal shared between the watch loop and its owner

pub mod dispatch;
pub mod handler;
pub mod ignore;
pub mod source;
pub mod stop;


pub use dispatch::{Dispatch, DispatchTable, MonitorStats};
pub use handler::{Handler, HandlerSet};
pub use ignore::{IgnoreConfig, IgnoreRules};
pub use source::{ChannelSource, EventSource, NotifySource, ReplaySource};
pub use stop::StopSignal;

pub use filewatch_core::{ChangeEvent, Error, EventKind, RawChange, Result, WatchRequest};
