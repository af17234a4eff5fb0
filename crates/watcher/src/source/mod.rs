//! Event sources feeding the dispatch table
//!
//! A source turns some native notification stream into batches of
//! [`RawChange`]s. It does not validate codes; that is the dispatch
//! table's job.

mod channel;
mod fs;
mod replay;

pub use channel::ChannelSource;
pub use fs::NotifySource;
pub use replay::ReplaySource;

use crate::stop::StopSignal;
use filewatch_core::{RawChange, Result, WatchRequest};

/// Producer of raw filesystem changes
pub trait EventSource {
    /// Begin observing the request's paths
    fn start(&mut self, request: &WatchRequest) -> Result<()>;

    /// Block until the next batch of changes is available
    ///
    /// Returns `Ok(None)` once the source is exhausted or `stop` has been
    /// raised.
    fn next_batch(&mut self, stop: &StopSignal) -> Result<Option<Vec<RawChange>>>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn start(&mut self, request: &WatchRequest) -> Result<()> {
        (**self).start(request)
    }

    fn next_batch(&mut self, stop: &StopSignal) -> Result<Option<Vec<RawChange>>> {
        (**self).next_batch(stop)
    }
}
