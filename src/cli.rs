// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `dirview`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dirview",
    version,
    about = "Walk and hash directory trees while honouring exclude patterns.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Dirview.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DIRVIEW_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Name of the exclude file looked up in the root directory.
    #[arg(long, value_name = "NAME", global = true)]
    pub exclude_file: Option<String>,

    /// Extra base exclude pattern (repeatable), applied before the exclude file.
    #[arg(long = "exclude", value_name = "PATTERN", global = true)]
    pub excludes: Vec<String>,

    /// Drop the configured base excludes (`.git/`, `.hg/`, `.svn/` by default).
    #[arg(long, global = true)]
    pub no_default_excludes: bool,

    /// Sort directory listings by name.
    #[arg(long, global = true)]
    pub sort: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List included files, relative to the root.
    Files {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// List directories that are descended into, relative to the root.
    Subdirs {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Print the digest of all included files.
    Hash {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// List subdirectories containing a marker file.
    FindProject {
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[arg(long, default_value = ".project")]
        marker: String,
    },
    /// Report whether a path is excluded and by which pattern.
    Check {
        /// Path to check; relative paths are taken relative to `--dir`.
        path: PathBuf,
        /// Root directory the patterns are relative to.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the digest of a single file.
    Filehash { file: PathBuf },
    /// Print the digest of every file below a directory, ignoring all patterns.
    Hashdir { dir: PathBuf },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
