//! Configuration file handling
//!
//! Lookup order: `--config FILE`, then `./filewatch.toml`, then
//! `<config dir>/filewatch/config.toml`, then built-in defaults.
//! Command-line flags are applied on top with [`Config::apply`].

use anyhow::{Context, Result};
use filewatch_core::WatchRequest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use watcher::IgnoreConfig;

/// Name of the per-project config file
pub const CONFIG_FILE_NAME: &str = "filewatch.toml";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Paths to watch
    pub paths: Vec<PathBuf>,

    /// Destination handed to handlers as FILEWATCH_BACKUP_DEST
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dest: Option<PathBuf>,

    /// Watch directories recursively (default: true)
    pub recursive: bool,

    /// Drop permission/ownership-only changes
    pub ignore_permission_changes: bool,

    pub handlers: HandlerCommands,

    pub ignore: IgnoreConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            backup_dest: None,
            recursive: true,
            ignore_permission_changes: false,
            handlers: HandlerCommands::default(),
            ignore: IgnoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Shell commands run for each event kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerCommands {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_add: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_modify: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,

    /// Print `<kind> <path>` for kinds without a command
    pub echo: bool,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for filewatch's own targets (trace, debug, info, warn, error)
    pub level: String,

    /// Also write logs to this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            file: None,
        }
    }
}

/// Values given on the command line, applied over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub paths: Vec<PathBuf>,
    pub backup_dest: Option<PathBuf>,
    pub on_add: Option<String>,
    pub on_modify: Option<String>,
    pub on_delete: Option<String>,
    pub echo: bool,
    pub ignore_patterns: Vec<String>,
    pub no_default_ignore: bool,
    pub gitignore: bool,
    pub non_recursive: bool,
    pub ignore_permission_changes: bool,
    pub quiet: bool,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse configuration")
    }

    /// Load configuration, returning it with the file it came from
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let Some(path) = config_file_path(explicit) else {
            return Ok((Self::default(), None));
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }

        Ok((config, Some(path)))
    }

    /// Anchor relative paths from a config file at the file's directory
    fn resolve_relative_to(&mut self, base: &Path) {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        self.paths.iter_mut().for_each(anchor);
        if let Some(dest) = self.backup_dest.as_mut() {
            anchor(dest);
        }
        if let Some(file) = self.logging.file.as_mut() {
            anchor(file);
        }
    }

    /// Apply command-line values; flags only ever switch behaviour on
    pub fn apply(&mut self, overrides: Overrides) {
        if !overrides.paths.is_empty() {
            self.paths = overrides.paths;
        }
        if overrides.backup_dest.is_some() {
            self.backup_dest = overrides.backup_dest;
        }
        if overrides.on_add.is_some() {
            self.handlers.on_add = overrides.on_add;
        }
        if overrides.on_modify.is_some() {
            self.handlers.on_modify = overrides.on_modify;
        }
        if overrides.on_delete.is_some() {
            self.handlers.on_delete = overrides.on_delete;
        }
        if overrides.echo {
            self.handlers.echo = true;
        }

        self.ignore
            .additional_patterns
            .extend(overrides.ignore_patterns);
        if overrides.no_default_ignore {
            self.ignore.use_default_filter = false;
        }
        if overrides.gitignore {
            self.ignore.use_gitignore = true;
        }
        if overrides.non_recursive {
            self.recursive = false;
        }
        if overrides.ignore_permission_changes {
            self.ignore_permission_changes = true;
        }

        if overrides.quiet {
            self.logging.level = "warn".to_string();
        }
        if overrides.log_file.is_some() {
            self.logging.file = overrides.log_file;
        }
    }

    /// Build the watch request described by this configuration
    pub fn watch_request(&self) -> Result<WatchRequest> {
        let mut request = WatchRequest::new(self.paths.iter().cloned())
            .context("No paths to watch (pass them as arguments or set `paths` in the config file)")?
            .recursive(self.recursive);

        if let Some(dest) = &self.backup_dest {
            request = request.with_backup_dest(dest.clone());
        }

        Ok(request)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Locate the configuration file to use, if any
///
/// An explicit path is always returned, existing or not, so that a typo
/// surfaces as a read error instead of silently falling back to defaults.
pub fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("filewatch").join("config.toml"))
        .filter(|path| path.is_file())
}
