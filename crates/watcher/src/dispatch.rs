//! Routing of change events to registered handlers
//!
//! Every event is handled to completion before the next one is looked at:
//! either its handler runs, or a warning is logged because none is
//! registered. Codes outside the known vocabulary stop the stream.

use crate::handler::HandlerSet;
use crate::source::EventSource;
use crate::stop::StopSignal;
use filewatch_core::{ChangeEvent, Error, RawChange, Result, WatchRequest};
use tracing::{debug, info, warn};

/// Outcome of dispatching one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The registered handler ran and returned Ok
    Invoked,
    /// No handler is registered for the event's kind
    Unhandled,
}

/// Counters for a finished watch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub batches: usize,
    pub events: usize,
    pub invoked: usize,
    pub unhandled: usize,
}

impl MonitorStats {
    fn record(&mut self, outcome: Dispatch) {
        self.events += 1;
        match outcome {
            Dispatch::Invoked => self.invoked += 1,
            Dispatch::Unhandled => self.unhandled += 1,
        }
    }
}

/// Routes changes on a watch request to its handlers
pub struct DispatchTable {
    request: WatchRequest,
    handlers: HandlerSet,
}

impl DispatchTable {
    pub fn new(request: WatchRequest, handlers: HandlerSet) -> Self {
        Self { request, handlers }
    }

    /// Dispatch one typed event
    ///
    /// Handler errors are returned as [`Error::Handler`]; a missing handler
    /// only logs a warning.
    pub fn handle_event(&self, event: &ChangeEvent) -> Result<Dispatch> {
        let kind = event.kind();
        let path = event.path();

        debug!(path = %path.display(), "File event occurred");
        debug!(kind = %kind, code = kind.code(), "Event type");

        let Some(handler) = self.handlers.get(kind) else {
            warn!(
                handler = kind.handler_name(),
                path = %path.display(),
                "No handler registered for {} events, skipping",
                kind
            );
            return Ok(Dispatch::Unhandled);
        };

        debug!(handler = kind.handler_name(), "Executing handler for the {} event", kind);
        handler(path).map_err(|source| Error::Handler {
            kind,
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Dispatch::Invoked)
    }

    /// Validate a raw change and dispatch it
    ///
    /// Unknown codes fail with [`Error::UnknownEventKind`] before any
    /// handler is consulted.
    pub fn handle_raw(&self, raw: RawChange) -> Result<Dispatch> {
        let event = ChangeEvent::try_from(raw)?;
        self.handle_event(&event)
    }

    /// Run `source` against this table's request until it is exhausted or
    /// `stop` is raised
    ///
    /// The first error (unknown kind, failing handler, failing source) ends
    /// the watch and is returned.
    pub fn monitor_events<S>(&self, source: &mut S, stop: &StopSignal) -> Result<MonitorStats>
    where
        S: EventSource + ?Sized,
    {
        source.start(&self.request)?;

        info!(
            paths = self.request.paths().len(),
            recursive = self.request.is_recursive(),
            handlers = ?self.handlers.registered(),
            "Watching for file events"
        );

        let mut stats = MonitorStats::default();

        while !stop.is_stopped() {
            let Some(batch) = source.next_batch(stop)? else {
                debug!("Event source exhausted");
                break;
            };

            stats.batches += 1;
            debug!(changes = batch.len(), "Received change batch");

            for raw in batch {
                let outcome = self.handle_raw(raw)?;
                stats.record(outcome);
            }
        }

        info!(
            events = stats.events,
            invoked = stats.invoked,
            unhandled = stats.unhandled,
            "Stopped watching"
        );

        Ok(stats)
    }
}
