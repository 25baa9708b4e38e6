// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DirviewError, Result};
use crate::pattern::PatternMatcher;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DirviewError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.view))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_chunk_size(cfg)?;
    validate_exclude_file(cfg)?;
    validate_excludes(cfg)?;
    Ok(())
}

fn validate_chunk_size(cfg: &RawConfigFile) -> Result<()> {
    if cfg.view.chunk_size == 0 {
        return Err(DirviewError::ConfigError(
            "[view].chunk_size must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_exclude_file(cfg: &RawConfigFile) -> Result<()> {
    check_exclude_file_name(&cfg.view.exclude_file)
}

/// The exclude file lives directly in the root, so its name must be a
/// single path component. Shared with the `--exclude-file` override.
pub(crate) fn check_exclude_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DirviewError::ConfigError(
            "exclude_file must not be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(DirviewError::ConfigError(format!(
            "exclude_file must be a plain file name, got '{}'",
            name
        )));
    }
    Ok(())
}

/// Compile the base excludes once so a bad pattern fails at load time
/// instead of at the first traversal.
fn validate_excludes(cfg: &RawConfigFile) -> Result<()> {
    PatternMatcher::compile(&cfg.view.excludes)?;
    Ok(())
}
