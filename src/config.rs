//! Run settings.
//!
//! Each setting is resolved from the first source that provides it:
//! command-line flag, `ASCII_HAMMING_*` environment variable, TOML config
//! file, built-in default.  The first two are merged by the CLI layer and
//! arrive here as [`Overrides`].
//!
//! ```toml
//! parity = "odd"
//! prefix = "out/message"
//! max_input = 4096
//! max_plane_bytes = 512
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HammingError, Result};
use crate::hamming::ParityMode;
use crate::plane_file::{PlaneFileSet, DEFAULT_MAX_PLANE_BYTES};

pub const DEFAULT_PARITY:    &str  = "even";
pub const DEFAULT_PREFIX:    &str  = "file";
/// Default bound on the encoded message, in bytes.
pub const DEFAULT_MAX_INPUT: usize = 1024;

// ── Config file ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub parity:          Option<String>,
    pub prefix:          Option<String>,
    pub max_input:       Option<usize>,
    pub max_plane_bytes: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| HammingError::Config {
            path:    path.to_owned(),
            message: format!("failed to read: {err}"),
        })?;
        toml::from_str(&text).map_err(|err| HammingError::Config {
            path:    path.to_owned(),
            message: err.to_string(),
        })
    }
}

// ── Overrides ────────────────────────────────────────────────────────────────

/// Values given on the command line or in the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub config:          Option<PathBuf>,
    pub parity:          Option<String>,
    pub prefix:          Option<String>,
    pub max_input:       Option<usize>,
    pub max_plane_bytes: Option<usize>,
}

// ── Settings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub parity:          ParityMode,
    pub prefix:          String,
    pub max_input:       usize,
    pub max_plane_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            parity:          ParityMode::Even,
            prefix:          DEFAULT_PREFIX.to_owned(),
            max_input:       DEFAULT_MAX_INPUT,
            max_plane_bytes: DEFAULT_MAX_PLANE_BYTES,
        }
    }
}

impl Settings {
    /// Load the config file named in `overrides`, if any, and merge.
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let file = match &overrides.config {
            Some(path) => FileConfig::load(path)?,
            None       => FileConfig::default(),
        };
        Self::merge(overrides, file)
    }

    /// Fails with `InvalidParity` if the winning parity string is not
    /// exactly `even` or `odd`.
    pub fn merge(overrides: Overrides, file: FileConfig) -> Result<Self> {
        let parity = overrides.parity
            .or(file.parity)
            .unwrap_or_else(|| DEFAULT_PARITY.to_owned())
            .parse()?;
        let settings = Self {
            parity,
            prefix:          overrides.prefix.or(file.prefix).unwrap_or_else(|| DEFAULT_PREFIX.to_owned()),
            max_input:       overrides.max_input.or(file.max_input).unwrap_or(DEFAULT_MAX_INPUT),
            max_plane_bytes: overrides.max_plane_bytes.or(file.max_plane_bytes).unwrap_or(DEFAULT_MAX_PLANE_BYTES),
        };
        log::debug!("settings: {settings:?}");
        Ok(settings)
    }

    pub fn plane_files(&self) -> PlaneFileSet {
        PlaneFileSet::new(self.prefix.clone())
    }
}
