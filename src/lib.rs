// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod hash;
pub mod logging;
pub mod pattern;
pub mod types;
pub mod view;

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::cli::{CliArgs, Command};
use crate::config::validate::check_exclude_file_name;
use crate::config::{load_or_default, ConfigFile};
use crate::fs::RealFileSystem;
use crate::view::{DirectoryView, ViewOptions};

pub use crate::errors::{DirviewError, Result as DirviewResult};
pub use crate::hash::{filehash, hashdir, DirDigest};
pub use crate::pattern::{Pattern, PatternMatcher};
pub use crate::view::{Walk, WalkEntry};

/// High-level entry point used by `main.rs`.
///
/// Loads configuration, then runs the command on a blocking worker thread.
/// Ctrl-C abandons the worker; traversal itself has no cancellation points.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let options = effective_options(&cfg, &args)?;
    debug!(?options, "effective view options");

    let command = args.command.clone();
    let work = tokio::task::spawn_blocking(move || execute(&command, options));

    tokio::select! {
        joined = work => joined.context("command worker panicked")?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("listening for Ctrl+C")?;
            warn!("interrupted");
            bail!("interrupted")
        }
    }
}

/// Merge CLI overrides into the configured view options.
///
/// `--no-default-excludes` clears the configured base list; `--exclude`
/// patterns are appended after whatever remains. `--exclude-file` gets the
/// same name check as the config file.
pub fn effective_options(cfg: &ConfigFile, args: &CliArgs) -> DirviewResult<ViewOptions> {
    let mut options = cfg.view_options();
    if let Some(name) = &args.exclude_file {
        check_exclude_file_name(name)?;
        options.exclude_file = Some(name.clone());
    }
    if args.no_default_excludes {
        options.base_excludes.clear();
    }
    options.base_excludes.extend(args.excludes.iter().cloned());
    if args.sort {
        options.sort_entries = true;
    }
    Ok(options)
}

fn open_view(dir: &Path, options: ViewOptions) -> Result<DirectoryView> {
    DirectoryView::with_options(Arc::new(RealFileSystem), dir, options)
        .with_context(|| format!("opening {:?}", dir))
}

fn execute(command: &Command, options: ViewOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Files { dir } => {
            let view = open_view(dir, options)?;
            for file in view.files() {
                writeln!(out, "{}", file?)?;
            }
        }
        Command::Subdirs { dir } => {
            let view = open_view(dir, options)?;
            for subdir in view.subdirs() {
                writeln!(out, "{}", subdir?)?;
            }
        }
        Command::Hash { dir } => {
            let view = open_view(dir, options)?;
            writeln!(out, "{}", view.hash()?)?;
        }
        Command::FindProject { dir, marker } => {
            let view = open_view(dir, options)?;
            for project in view.find_project(marker) {
                writeln!(out, "{}", project?)?;
            }
        }
        Command::Check { path, dir } => {
            let view = open_view(dir, options)?;
            let Some(rel) = view.relpath(path) else {
                bail!("{:?} is outside {:?}", path, view.root());
            };
            match view.exclusion_for(path) {
                Some(ex) if ex.matched_path == rel => {
                    writeln!(out, "excluded\t{rel}\t{}", ex.pattern)?;
                }
                Some(ex) => {
                    writeln!(out, "excluded\t{rel}\t{} (via {})", ex.pattern, ex.matched_path)?;
                }
                None => match view.matched_pattern(path, None) {
                    Some(m) if m.pattern.is_negation() => {
                        writeln!(out, "included\t{rel}\t{}", m.pattern)?
                    }
                    _ => writeln!(out, "included\t{rel}")?,
                },
            }
        }
        Command::Filehash { file } => {
            let digest = hash::filehash_with(&RealFileSystem, file, options.chunk_size)?;
            writeln!(out, "{digest}")?;
        }
        Command::Hashdir { dir } => {
            let digest = hash::hashdir_with(Arc::new(RealFileSystem), dir, options.chunk_size)?;
            writeln!(out, "{digest}")?;
        }
    }

    out.flush()?;
    Ok(())
}
