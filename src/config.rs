//! Repository configuration (`.weld.toml`).
//!
//! Typed configuration for the batch suite writer. Missing fields use
//! sensible defaults; a missing file means all defaults (no error).

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level repository configuration, parsed from `.weld.toml`.
///
/// ```toml
/// [write]
/// tests_dir = "src/test/java"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct WeldConfig {
    /// Suite writer settings.
    #[serde(default)]
    pub write: WriteConfig,
}

// ---------------------------------------------------------------------------
// WriteConfig
// ---------------------------------------------------------------------------

/// Settings for the batch suite writer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteConfig {
    /// Root of the test source tree; package directories are created
    /// beneath it (default: `"src/test/java"`).
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            tests_dir: default_tests_dir(),
        }
    }
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("src/test/java")
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// A configuration file could not be read or parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    /// Path of the offending file, when known.
    pub path: Option<PathBuf>,
    /// Human-readable description of the problem.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "config error in `{}`: {}", path.display(), self.message),
            None => write!(f, "config error: {}", self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl WeldConfig {
    /// Load `.weld.toml` from `dir`. A missing file yields all defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the file exists but cannot be read or parsed.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(".weld.toml");
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError {
                    path: Some(path),
                    message: err.to_string(),
                });
            }
        };
        toml::from_str(&raw).map_err(|err| ConfigError {
            path: Some(path),
            message: err.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
