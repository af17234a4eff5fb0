//! Live watching through the binary

use crate::common::cli::CommandResult;
use crate::fw;
use anyhow::Result;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn test_watch_without_paths_fails() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "watch", "--echo").assert_failure()?;

    assert!(result.contains_stderr("No paths to watch"));
    Ok(())
}

#[test]
fn test_watch_missing_path_fails() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "watch", "does-not-exist", "--echo").assert_failure()?;

    assert!(result.contains_stderr("watched path not found"));
    assert!(result.contains_stderr("does-not-exist"));
    Ok(())
}

#[test]
fn test_watch_echoes_created_file() -> Result<()> {
    let dir = TempDir::new()?;
    let watched = dir.path().join("watched");
    std::fs::create_dir(&watched)?;

    let start = Instant::now();
    let mut child = fw!(dir.path(), "--quiet", "watch", "watched", "--echo").spawn()?;

    // Give the backend time to register the watch
    thread::sleep(Duration::from_millis(500));
    std::fs::write(watched.join("fresh.txt"), "hello")?;
    thread::sleep(Duration::from_millis(1500));

    child.kill()?;
    let output = child.wait_with_output()?;
    let result = CommandResult::from_output(&output, start.elapsed());

    assert!(
        result
            .stdout
            .lines()
            .any(|line| line.starts_with("added ") && line.ends_with("fresh.txt")),
        "stdout: {}\nstderr: {}",
        result.stdout,
        result.stderr
    );
    Ok(())
}
