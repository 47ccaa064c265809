//! Optional RON configuration for the batch driver.
//!
//! ```ron
//! (
//!     vocabulary: (
//!         auxiliary_sections: ["see also", "trivia"],
//!         max_depth: 32,
//!     ),
//!     log_level: Some("debug"),
//! )
//! ```
//!
//! Every field may be left out; omitted vocabulary sets keep their built-in
//! contents.

use std::fs;
use std::path::{Path, PathBuf};

use asymptote_core::Vocabulary;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub vocabulary: Vocabulary,
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Level named in the file, if any.
    pub fn level_filter(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.log_level
            .as_deref()
            .map(|name| {
                name.trim()
                    .parse::<LevelFilter>()
                    .map_err(|_| ConfigError::LogLevel(name.to_string()))
            })
            .transpose()
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let pretty = ron::ser::PrettyConfig::new();
        ron::ser::to_string_pretty(self, pretty)
    }
}

/// Loads `path`, or the built-in defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
