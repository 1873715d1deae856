//! Config root resolution
//!
//! Priority:
//! 1. --config-root <path> flag (must exist)
//! 2. $CLINICAL_NER_HOME
//! 3. Current directory "."

use crate::cli::{Error, Result};
use std::path::{Path, PathBuf};

/// Env var naming the config root
pub const ENV_HOME: &str = "CLINICAL_NER_HOME";

/// Resolve the config root
pub fn resolve_config_root(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_config_root_with(explicit, std::env::var(ENV_HOME).ok())
}

/// Resolve the config root with an explicit `$CLINICAL_NER_HOME` value
pub fn resolve_config_root_with(explicit: Option<&Path>, home: Option<String>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_dir() {
            return Err(Error::InvalidArgs(format!(
                "config root '{}' does not exist",
                path.display()
            )));
        }
        return Ok(path.to_path_buf());
    }

    if let Some(home) = home.filter(|h| !h.trim().is_empty()) {
        return Ok(PathBuf::from(home));
    }

    Ok(PathBuf::from("."))
}
