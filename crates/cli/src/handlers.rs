//! Shell command handlers
//!
//! Each configured command runs through the platform shell with the changed
//! path as `$1` and these environment variables:
//! - `FILEWATCH_EVENT`: `added`, `modified` or `deleted`
//! - `FILEWATCH_PATH`: the changed path
//! - `FILEWATCH_BACKUP_DEST`: the configured backup destination, when set

use crate::config::HandlerCommands;
use anyhow::{Context, Result};
use filewatch_core::EventKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use watcher::HandlerSet;

/// Build the handler set for the configured commands
///
/// With `echo` set, kinds without a command print `<kind> <path>`.
pub fn build(commands: &HandlerCommands, backup_dest: Option<&Path>) -> HandlerSet {
    let mut handlers = HandlerSet::new();

    for kind in EventKind::ALL {
        let command = match kind {
            EventKind::Added => &commands.on_add,
            EventKind::Modified => &commands.on_modify,
            EventKind::Deleted => &commands.on_delete,
        };

        handlers = match command {
            Some(command) => handlers.on(
                kind,
                command_handler(kind, command.clone(), backup_dest.map(Path::to_path_buf)),
            ),
            None if commands.echo => handlers.on(kind, echo_handler(kind)),
            None => handlers,
        };
    }

    handlers
}

fn command_handler(
    kind: EventKind,
    command: String,
    backup_dest: Option<PathBuf>,
) -> impl Fn(&Path) -> Result<()> + Send + Sync + 'static {
    move |path| {
        debug!(handler = kind.handler_name(), command = %command, "Running command");

        let mut cmd = shell_command(&command, path);
        cmd.env("FILEWATCH_EVENT", kind.as_str())
            .env("FILEWATCH_PATH", path);
        if let Some(dest) = &backup_dest {
            cmd.env("FILEWATCH_BACKUP_DEST", dest);
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to spawn {} command", kind.handler_name()))?;

        if !status.success() {
            anyhow::bail!("{} command exited with {}", kind.handler_name(), status);
        }
        Ok(())
    }
}

fn echo_handler(kind: EventKind) -> impl Fn(&Path) -> Result<()> + Send + Sync + 'static {
    move |path| {
        println!("{} {}", kind, path.display());
        Ok(())
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str, path: &Path) -> Command {
    let mut cmd = Command::new("sh");
    // $0 is the script name, the path lands in $1
    cmd.arg("-c").arg(command).arg("filewatch").arg(path);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str, _path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
