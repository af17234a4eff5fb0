//! Dispatch recorded changes

use anyhow::{Context, Result};
use cli_lib::config::Config;
use cli_lib::handlers;
use filewatch_core::WatchRequest;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use watcher::{DispatchTable, ReplaySource, StopSignal};

/// Replay `input` (or stdin) through the configured handlers
///
/// Replays are not tied to the watched paths; without any configured the
/// request falls back to the current directory.
pub fn run(config: Config, input: Option<PathBuf>) -> Result<()> {
    let request = if config.paths.is_empty() {
        let request = WatchRequest::new(["."])?;
        match &config.backup_dest {
            Some(dest) => request.with_backup_dest(dest.clone()),
            None => request,
        }
    } else {
        config.watch_request()?
    };

    let handlers = handlers::build(&config.handlers, request.backup_dest());
    let table = DispatchTable::new(request, handlers);

    let reader = open_input(input.as_deref())?;
    let mut source = ReplaySource::new(reader);

    table
        .monitor_events(&mut source, &StopSignal::new())
        .context("Replay stopped")?;
    Ok(())
}

fn open_input(input: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match input {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}
