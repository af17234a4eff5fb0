//! Filewatch CLI - filewatch command

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cli_lib::config::{Config, Overrides};
use std::path::PathBuf;

mod cmd;

/// Filewatch - run commands when watched files are added, modified or deleted
#[derive(Parser)]
#[command(name = "filewatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: ./filewatch.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch paths and dispatch handlers until interrupted
    Watch {
        /// Paths to watch (default: `paths` from the config file)
        paths: Vec<PathBuf>,

        #[command(flatten)]
        handlers: HandlerArgs,

        #[command(flatten)]
        watch: WatchArgs,
    },
    /// Dispatch recorded `<code> <path>` lines
    Replay {
        /// File with one change per line (default: stdin)
        input: Option<PathBuf>,

        #[command(flatten)]
        handlers: HandlerArgs,
    },
    /// Show the resolved configuration
    Config,
}

#[derive(Args, Debug, Clone, Default)]
struct HandlerArgs {
    /// Command run when a file is added
    #[arg(long, value_name = "CMD")]
    on_add: Option<String>,

    /// Command run when a file is modified
    #[arg(long, value_name = "CMD")]
    on_modify: Option<String>,

    /// Command run when a file is deleted
    #[arg(long, value_name = "CMD")]
    on_delete: Option<String>,

    /// Print `<kind> <path>` for kinds without a command
    #[arg(long)]
    echo: bool,

    /// Destination exposed to commands as FILEWATCH_BACKUP_DEST
    #[arg(long, value_name = "DIR")]
    backup_dest: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
struct WatchArgs {
    /// Additional gitignore-style pattern to ignore (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore_patterns: Vec<String>,

    /// Report changes in .git, node_modules, editor temp files, ...
    #[arg(long)]
    no_default_ignore: bool,

    /// Honour the .gitignore of each watched root
    #[arg(long)]
    gitignore: bool,

    /// Only watch the top level of each directory
    #[arg(long)]
    non_recursive: bool,

    /// Drop permission and ownership changes
    #[arg(long)]
    ignore_permission_changes: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let mut overrides = Overrides {
            quiet: self.quiet,
            log_file: self.log_file.clone(),
            ..Overrides::default()
        };

        let (handlers, watch) = match &self.command {
            Commands::Watch { paths, handlers, watch } => {
                overrides.paths = paths.clone();
                (Some(handlers), Some(watch))
            }
            Commands::Replay { handlers, .. } => (Some(handlers), None),
            Commands::Config => (None, None),
        };

        if let Some(handlers) = handlers {
            overrides.on_add = handlers.on_add.clone();
            overrides.on_modify = handlers.on_modify.clone();
            overrides.on_delete = handlers.on_delete.clone();
            overrides.echo = handlers.echo;
            overrides.backup_dest = handlers.backup_dest.clone();
        }

        if let Some(watch) = watch {
            overrides.ignore_patterns = watch.ignore_patterns.clone();
            overrides.no_default_ignore = watch.no_default_ignore;
            overrides.gitignore = watch.gitignore;
            overrides.non_recursive = watch.non_recursive;
            overrides.ignore_permission_changes = watch.ignore_permission_changes;
        }

        overrides
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = Config::load(cli.config.as_deref())?;
    config.apply(cli.overrides());

    // Keep the file writer alive until exit
    let _log_guard = cli_lib::logging::init(&config.logging)?;

    match cli.command {
        Commands::Watch { .. } => cmd::watch::run(config).await,
        Commands::Replay { input, .. } => cmd::replay::run(config, input),
        Commands::Config => cmd::config::run(&config, source.as_deref()),
    }
}
