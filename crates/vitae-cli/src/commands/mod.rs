//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod job;

use std::path::{Path, PathBuf};

use tracing::debug;
use vitae_core::models::document::SourceKind;
use vitae_core::VitaeConfig;

/// Output format for extracted records.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Where the input text came from, when the file extension is not enough.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Plain or pasted text
    Text,
    /// PDF text layer
    Pdf,
    /// Word processor export (tabs separate fields)
    Office,
}

impl From<KindArg> for SourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => SourceKind::PlainText,
            KindArg::Pdf => SourceKind::Pdf,
            KindArg::Office => SourceKind::OfficeDocument,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitae")
        .join("config.json")
}

/// The config file in use: the `--config` argument or the default location.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path.map_or_else(default_config_path, PathBuf::from)
}

/// Load configuration. An explicit path must exist; the default location
/// falls back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VitaeConfig> {
    match config_path {
        Some(path) => Ok(VitaeConfig::from_file(Path::new(path))?),
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Using config file {}", path.display());
                Ok(VitaeConfig::from_file(&path)?)
            } else {
                Ok(VitaeConfig::default())
            }
        }
    }
}
