//! Per-kind handler registration

use filewatch_core::EventKind;
use std::fmt;
use std::path::Path;

/// A user handler, called with the changed path
pub type Handler = Box<dyn Fn(&Path) -> anyhow::Result<()> + Send + Sync>;

/// Zero or one handler for each event kind
///
/// Built once, then handed to a [`DispatchTable`](crate::DispatchTable).
#[derive(Default)]
pub struct HandlerSet {
    on_add: Option<Handler>,
    on_modify: Option<Handler>,
    on_delete: Option<Handler>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for added files
    pub fn on_add<F>(self, handler: F) -> Self
    where
        F: Fn(&Path) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on(EventKind::Added, handler)
    }

    /// Register the handler for modified files
    pub fn on_modify<F>(self, handler: F) -> Self
    where
        F: Fn(&Path) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on(EventKind::Modified, handler)
    }

    /// Register the handler for deleted files
    pub fn on_delete<F>(self, handler: F) -> Self
    where
        F: Fn(&Path) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.on(EventKind::Deleted, handler)
    }

    /// Register `handler` for `kind`, replacing any earlier one
    pub fn on<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&Path) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        *self.slot_mut(kind) = Some(Box::new(handler));
        self
    }

    /// Handler registered for `kind`, if any
    pub fn get(&self, kind: EventKind) -> Option<&Handler> {
        match kind {
            EventKind::Added => self.on_add.as_ref(),
            EventKind::Modified => self.on_modify.as_ref(),
            EventKind::Deleted => self.on_delete.as_ref(),
        }
    }

    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.get(kind).is_some()
    }

    /// Kinds that have a handler
    pub fn registered(&self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| self.is_registered(*kind))
            .collect()
    }

    fn slot_mut(&mut self, kind: EventKind) -> &mut Option<Handler> {
        match kind {
            EventKind::Added => &mut self.on_add,
            EventKind::Modified => &mut self.on_modify,
            EventKind::Deleted => &mut self.on_delete,
        }
    }
}

impl fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSet")
            .field("on_add", &self.on_add.is_some())
            .field("on_modify", &self.on_modify.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .finish()
    }
}
