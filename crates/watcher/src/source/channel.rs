//! Changes pushed in from another thread

use super::EventSource;
use crate::stop::StopSignal;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use filewatch_core::{RawChange, Result, WatchRequest};
use std::time::Duration;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source fed by a crossbeam channel
///
/// Exhausted once every sender has been dropped.
pub struct ChannelSource {
    rx: Receiver<RawChange>,
    poll_interval: Duration,
}

impl ChannelSource {
    pub fn new(rx: Receiver<RawChange>) -> Self {
        Self {
            rx,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// How often to check the stop signal while idle
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl EventSource for ChannelSource {
    fn start(&mut self, _request: &WatchRequest) -> Result<()> {
        Ok(())
    }

    fn next_batch(&mut self, stop: &StopSignal) -> Result<Option<Vec<RawChange>>> {
        loop {
            if stop.is_stopped() {
                return Ok(None);
            }

            match self.rx.recv_timeout(self.poll_interval) {
                Ok(first) => {
                    let mut batch = vec![first];
                    batch.extend(self.rx.try_iter());
                    return Ok(Some(batch));
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            }
        }
    }
}
