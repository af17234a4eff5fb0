//! Replayed changes through the binary

use crate::fw;
use anyhow::Result;
use tempfile::TempDir;

#[test]
fn test_echo_prints_each_change() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "replay", "--echo")
        .stdin("1 a.txt\n2 b.txt\n3 c.txt\n")
        .assert_success()?;

    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines, vec!["added a.txt", "modified b.txt", "deleted c.txt"]);
    Ok(())
}

#[test]
fn test_replay_from_file() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("changes.log"), "# recorded\n\n2 notes.md\n")?;

    let result = fw!(dir.path(), "replay", "changes.log", "--echo").assert_success()?;

    assert_eq!(result.stdout.trim(), "modified notes.md");
    Ok(())
}

#[test]
fn test_unknown_code_fails() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "replay", "--echo")
        .stdin("4 a.txt\n")
        .assert_failure()?;

    assert!(result.contains_stderr("unknown event kind 4"));
    assert!(result.stdout.is_empty());
    Ok(())
}

#[test]
fn test_out_of_range_code_is_unknown_kind() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "replay", "--echo")
        .stdin("999 a.txt\n")
        .assert_failure()?;

    assert!(result.contains_stderr("unknown event kind 999"));
    assert!(!result.contains_stderr("malformed change"));
    Ok(())
}

#[test]
fn test_malformed_line_fails() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "replay", "--echo")
        .stdin("added a.txt\n")
        .assert_failure()?;

    assert!(result.contains_stderr("malformed change on line 1"));
    Ok(())
}

#[test]
fn test_missing_handler_warns_once() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "replay", "--on-add", "true")
        .stdin("2 a.txt\n")
        .assert_success()?;

    let warnings = result.log_lines("WARNING");
    assert_eq!(warnings.len(), 1, "stderr: {}", result.stderr);
    assert!(warnings[0].contains("handler=\"on_modify\""), "{}", warnings[0]);
    assert!(warnings[0].contains("(watcher::dispatch)"));
    // stderr is a pipe here, so no terminal styling
    assert!(!result.stderr.contains('\x1b'));
    Ok(())
}

#[test]
fn test_debug_trail_per_event() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "replay", "--echo")
        .stdin("1 a.txt\n")
        .assert_success()?;

    let debug = result.log_lines("DEBUG");
    assert!(debug.iter().any(|line| line.contains("File event occurred")));
    assert!(debug.iter().any(|line| line.contains("Event type")));
    assert!(debug
        .iter()
        .any(|line| line.contains("Executing handler for the added event")));
    Ok(())
}

#[test]
fn test_quiet_hides_debug() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "--quiet", "replay", "--echo")
        .stdin("1 a.txt\n")
        .assert_success()?;

    assert!(result.log_lines("DEBUG").is_empty());
    assert!(result.log_lines("INFO").is_empty());
    assert_eq!(result.stdout.trim(), "added a.txt");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_command_receives_event_env() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(
        dir.path(),
        "replay",
        "--backup-dest",
        "/srv/backup",
        "--on-delete",
        "echo \"$FILEWATCH_EVENT|$FILEWATCH_PATH|$1|$FILEWATCH_BACKUP_DEST\""
    )
    .stdin("3 old.txt\n")
    .assert_success()?;

    assert_eq!(result.stdout.trim(), "deleted|old.txt|old.txt|/srv/backup");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_failing_command_stops_replay() -> Result<()> {
    let dir = TempDir::new()?;

    let result = fw!(dir.path(), "replay", "--on-add", "exit 3", "--echo")
        .stdin("1 first.txt\n2 second.txt\n")
        .assert_failure()?;

    assert!(result.contains_stderr("added handler failed for first.txt"));
    assert!(!result.contains_stdout("second.txt"));
    Ok(())
}
