//! Ignore rules for watched trees
//!
//! Supports multiple sources of ignore patterns:
//! 1. Default filter (VCS metadata, caches, editor temp files)
//! 2. .gitignore of each watched root (optional, off by default)
//! 3. Config-based patterns (gitignore syntax)

use filewatch_core::{Error, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory names whose contents are never reported by the default filter
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    ".hg",
    ".svn",
    ".tox",
    ".venv",
    ".idea",
    "node_modules",
    ".mypy_cache",
    ".pytest_cache",
    ".hypothesis",
];

/// Ignore rule manager
///
/// Holds one matcher per watched root so that gitignore-style patterns are
/// anchored the same way git anchors them.
pub struct IgnoreRules {
    /// Watched roots with their compiled patterns
    matchers: Vec<(PathBuf, Gitignore)>,

    /// Configuration
    config: IgnoreConfig,
}

impl IgnoreRules {
    /// Build ignore rules for the given watched roots
    ///
    /// A root that is a file is anchored at its parent directory.
    pub fn load(roots: &[PathBuf], config: IgnoreConfig) -> Result<Self> {
        let mut matchers = Vec::with_capacity(roots.len());

        for root in roots {
            let anchor = if root.is_file() {
                root.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone())
            } else {
                root.clone()
            };

            let mut builder = GitignoreBuilder::new(&anchor);

            if config.use_gitignore {
                let gitignore_path = anchor.join(".gitignore");
                if gitignore_path.exists() {
                    if let Some(err) = builder.add(&gitignore_path) {
                        return Err(pattern_error(err));
                    }
                }
            }

            for pattern in &config.additional_patterns {
                builder.add_line(None, pattern).map_err(pattern_error)?;
            }

            let gitignore = builder.build().map_err(pattern_error)?;
            matchers.push((anchor, gitignore));
        }

        Ok(Self { matchers, config })
    }

    /// Rules with only the default filter and no anchored patterns
    pub fn defaults() -> Self {
        Self {
            matchers: Vec::new(),
            config: IgnoreConfig::default(),
        }
    }

    /// Check if path should be ignored
    pub fn should_ignore(&self, path: &Path) -> bool {
        if self.config.use_default_filter && is_default_ignored(path) {
            return true;
        }

        let mut is_dir = None;
        for (root, gitignore) in &self.matchers {
            if gitignore.is_empty() || !path.starts_with(root) {
                continue;
            }

            let is_dir = *is_dir.get_or_insert_with(|| path.is_dir());
            if gitignore.matched_path_or_any_parents(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }

    /// Number of watched roots with at least one anchored pattern
    pub fn active_matchers(&self) -> usize {
        self.matchers.iter().filter(|(_, gi)| !gi.is_empty()).count()
    }

    pub fn config(&self) -> &IgnoreConfig {
        &self.config
    }
}

fn pattern_error(err: ignore::Error) -> Error {
    Error::Source(anyhow::Error::new(err).context("invalid ignore pattern"))
}

/// Check a path against the default filter
///
/// Covers VCS and cache directories anywhere in the path, plus Python
/// bytecode, JetBrains safe-write files, Vim swap files, backup files,
/// Emacs locks, macOS metadata and flycheck temp files.
pub fn is_default_ignored(path: &Path) -> bool {
    let in_ignored_dir = path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| DEFAULT_IGNORE_DIRS.contains(&name))
    });
    if in_ignored_dir {
        return true;
    }

    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    // Python bytecode
    if filename.ends_with(".pyc") || filename.ends_with(".pyo") || filename.ends_with(".pyd") {
        return true;
    }

    // JetBrains safe-write temp files (foo.rs___jb_tmp___)
    if filename.contains("___jb_") && filename.ends_with("___") {
        return true;
    }

    // Vim swap files (.swp, .swo, .swx, ...)
    if is_vim_swap(filename) {
        return true;
    }

    // Backup files (~) and Emacs lock files (.#*)
    if filename.ends_with('~') || filename.starts_with(".#") {
        return true;
    }

    filename == ".DS_Store" || filename.starts_with("flycheck_")
}

fn is_vim_swap(filename: &str) -> bool {
    let bytes = filename.as_bytes();
    bytes.len() >= 4 && &bytes[bytes.len() - 4..bytes.len() - 1] == b".sw"
}

/// Ignore configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Apply the built-in filter (default: true)
    #[serde(default = "default_true")]
    pub use_default_filter: bool,

    /// Use .gitignore of each watched root (default: false)
    #[serde(default)]
    pub use_gitignore: bool,

    /// Additional gitignore-style patterns
    #[serde(default)]
    pub additional_patterns: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_default_filter: true,
            use_gitignore: false,
            additional_patterns: vec![],
        }
    }
}

fn default_true() -> bool {
    true
}
