//! Live filesystem source backed by `notify`

use super::EventSource;
use crate::ignore::{IgnoreConfig, IgnoreRules};
use crate::stop::StopSignal;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use filewatch_core::{Error, EventKind, RawChange, Result, WatchRequest};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Source watching the request's paths through the platform watcher
///
/// Native events arrive on notify's own thread and are forwarded over a
/// channel; `next_batch` drains whatever is queued into one batch.
pub struct NotifySource {
    ignore_config: IgnoreConfig,
    ignore_permission_changes: bool,
    poll_interval: Duration,
    rules: IgnoreRules,
    rx: Option<Receiver<notify::Result<Event>>>,
    // Dropping the watcher stops the OS subscription
    _watcher: Option<RecommendedWatcher>,
}

impl NotifySource {
    pub fn new(ignore_config: IgnoreConfig) -> Self {
        Self {
            ignore_config,
            ignore_permission_changes: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            rules: IgnoreRules::defaults(),
            rx: None,
            _watcher: None,
        }
    }

    /// Drop metadata-only modifications (permissions, ownership, times)
    pub fn ignore_permission_changes(mut self, ignore: bool) -> Self {
        self.ignore_permission_changes = ignore;
        self
    }

    /// How often to check the stop signal while idle
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn collect(&self, result: notify::Result<Event>, batch: &mut Vec<RawChange>) -> Result<()> {
        let event = result.map_err(|e| Error::Source(anyhow::Error::new(e)))?;
        trace!(kind = ?event.kind, paths = ?event.paths, "Native event");

        for change in translate(&event, self.ignore_permission_changes) {
            if self.rules.should_ignore(&change.path) {
                trace!(path = %change.path.display(), "Ignored change");
                continue;
            }
            batch.push(change);
        }
        Ok(())
    }
}

impl Default for NotifySource {
    fn default() -> Self {
        Self::new(IgnoreConfig::default())
    }
}

impl EventSource for NotifySource {
    fn start(&mut self, request: &WatchRequest) -> Result<()> {
        let roots = request
            .paths()
            .iter()
            .map(|path| absolute(path))
            .collect::<Result<Vec<_>>>()?;

        if let Some(missing) = roots.iter().find(|root| !root.exists()) {
            return Err(Error::PathNotFound(missing.clone()));
        }

        self.rules = IgnoreRules::load(&roots, self.ignore_config.clone())?;

        let (tx, rx) = unbounded();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // The receiver is gone only after the source was dropped
            let _ = tx.send(res);
        })
        .map_err(|e| Error::Source(anyhow::Error::new(e)))?;

        let mode = if request.is_recursive() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        for root in &roots {
            watcher
                .watch(root, mode)
                .map_err(|e| Error::Source(anyhow::Error::new(e)))?;
            debug!(path = %root.display(), ?mode, "Watching path");
        }

        self.rx = Some(rx);
        self._watcher = Some(watcher);
        Ok(())
    }

    fn next_batch(&mut self, stop: &StopSignal) -> Result<Option<Vec<RawChange>>> {
        let Some(rx) = self.rx.clone() else {
            return Ok(None);
        };

        loop {
            if stop.is_stopped() {
                return Ok(None);
            }

            let first = match rx.recv_timeout(self.poll_interval) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            };

            let mut batch = Vec::new();
            self.collect(first, &mut batch)?;
            for result in rx.try_iter() {
                self.collect(result, &mut batch)?;
            }

            if !batch.is_empty() {
                return Ok(Some(batch));
            }
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Translate one native event into raw changes
///
/// Access events carry no change and produce nothing. Renames are split
/// into a delete of the old path and an add of the new one.
pub(crate) fn translate(event: &Event, ignore_permission_changes: bool) -> Vec<RawChange> {
    use notify::EventKind as Native;

    let added = EventKind::Added.code();
    let modified = EventKind::Modified.code();
    let deleted = EventKind::Deleted.code();

    let all = |code: i64| -> Vec<RawChange> {
        event
            .paths
            .iter()
            .map(|path| RawChange::new(code, path.clone()))
            .collect()
    };

    match &event.kind {
        Native::Create(_) => all(added),
        Native::Remove(_) => all(deleted),
        Native::Modify(ModifyKind::Metadata(_)) => {
            if ignore_permission_changes {
                Vec::new()
            } else {
                all(modified)
            }
        }
        Native::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => all(deleted),
            RenameMode::To => all(added),
            RenameMode::Both => {
                let mut changes = Vec::with_capacity(2);
                if let Some(from) = event.paths.first() {
                    changes.push(RawChange::new(deleted, from.clone()));
                }
                if let Some(to) = event.paths.get(1) {
                    changes.push(RawChange::new(added, to.clone()));
                }
                changes
            }
            RenameMode::Any | RenameMode::Other => event
                .paths
                .iter()
                .map(|path| {
                    let code = if path.exists() { added } else { deleted };
                    RawChange::new(code, path.clone())
                })
                .collect(),
        },
        Native::Modify(_) => all(modified),
        Native::Access(_) | Native::Any | Native::Other => Vec::new(),
    }
}
