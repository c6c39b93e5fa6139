use std::path::Path;

use miette::{Context, IntoDiagnostic};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::consts::START_FEN;
use crate::utils::log::{set_log_level, toggle_file_logging};

/// Settings for the `chesskit` tool, read from a TOML file.
///
/// Every key is optional:
/// ```toml
/// log_level = "debug"
/// file_logging = true
/// fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
/// perft_depth = 3
/// parallel = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Console level. Unset keeps whatever `RUST_LOG` asked for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub file_logging: bool,
    /// Position used when a command is given no `--fen`
    pub fen: String,
    pub perft_depth: u8,
    /// Split perft root moves over a thread pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            file_logging: false,
            fen: START_FEN.to_string(),
            perft_depth: 4,
            parallel: true,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> miette::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("Reading config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Parsing config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> miette::Result<Self> {
        toml::from_str(text).into_diagnostic()
    }

    pub fn to_toml(&self) -> miette::Result<String> {
        toml::to_string(self).into_diagnostic()
    }

    pub fn level(&self) -> miette::Result<Option<Level>> {
        self.log_level
            .as_deref()
            .map(|name| {
                name.parse::<Level>()
                    .into_diagnostic()
                    .with_context(|| format!("Unknown log level: {name}"))
            })
            .transpose()
    }

    /// Push the logging settings into the running subscriber. Filters the
    /// config says nothing about are left as `init` built them.
    pub fn apply(&self) -> miette::Result<()> {
        if let Some(level) = self.level()? {
            set_log_level(level)?;
        }
        if self.file_logging {
            toggle_file_logging(true)?;
        }
        Ok(())
    }
}
