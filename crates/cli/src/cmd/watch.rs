//! Watch paths until interrupted

use anyhow::{Context, Result};
use cli_lib::config::Config;
use cli_lib::handlers;
use tracing::{info, warn};
use watcher::{DispatchTable, NotifySource, StopSignal};

pub async fn run(config: Config) -> Result<()> {
    let request = config.watch_request()?;
    let handlers = handlers::build(&config.handlers, request.backup_dest());
    if handlers.registered().is_empty() {
        warn!("No handlers configured; events will only be logged");
    }

    let table = DispatchTable::new(request, handlers);
    let stop = StopSignal::new();

    let interrupt = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping watch");
            interrupt.stop();
        }
    });

    let ignore = config.ignore.clone();
    let ignore_permission_changes = config.ignore_permission_changes;

    // Dispatch blocks on handlers, so keep it off the async workers
    let stats = tokio::task::spawn_blocking(move || {
        let mut source =
            NotifySource::new(ignore).ignore_permission_changes(ignore_permission_changes);
        table.monitor_events(&mut source, &stop)
    })
    .await
    .context("Watch task panicked")?
    .context("Watch stopped")?;

    info!(
        batches = stats.batches,
        events = stats.events,
        "Watch finished"
    );
    Ok(())
}
