//! Turning files into `RawDocument`s.

mod pdf;

pub use pdf::extract_pdf_text;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{DocumentError, Result};
use crate::models::config::InputConfig;
use crate::models::document::{RawDocument, SourceKind};

/// How a file's bytes become text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoder {
    Utf8,
    Pdf,
}

fn decoder_for_extension(ext: &str) -> Option<Decoder> {
    match ext.to_lowercase().as_str() {
        "txt" | "md" | "text" => Some(Decoder::Utf8),
        "pdf" => Some(Decoder::Pdf),
        _ => None,
    }
}

/// Loads documents from disk or memory.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    max_file_size: u64,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
        }
    }

    /// Set the largest file that will be read, in bytes.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Load a file, choosing the decoder from its extension.
    ///
    /// `kind` overrides the source kind recorded on the document. For files
    /// with an unknown extension it also selects the decoder.
    pub fn load_path(&self, path: &Path, kind: Option<SourceKind>) -> Result<RawDocument> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let decoder = match (decoder_for_extension(ext), kind) {
            (Some(decoder), _) => decoder,
            (None, Some(SourceKind::Pdf)) => Decoder::Pdf,
            (None, Some(_)) => Decoder::Utf8,
            (None, None) => {
                let name = if ext.is_empty() { path.display().to_string() } else { format!(".{}", ext) };
                return Err(DocumentError::UnsupportedFormat(name).into());
            }
        };

        let size = std::fs::metadata(path)?.len();
        if size > self.max_file_size {
            return Err(DocumentError::TooLarge {
                size,
                max: self.max_file_size,
            }
            .into());
        }

        info!("Loading document: {}", path.display());
        let data = std::fs::read(path)?;

        let kind = kind.unwrap_or(match decoder {
            Decoder::Pdf => SourceKind::Pdf,
            Decoder::Utf8 => SourceKind::PlainText,
        });
        self.decode(&data, decoder, kind)
    }

    /// Decode in-memory bytes of the given kind.
    ///
    /// PDF bytes go through the PDF text layer; anything else is read as
    /// UTF-8, replacing invalid sequences.
    pub fn load_bytes(&self, data: &[u8], kind: SourceKind) -> Result<RawDocument> {
        let size = data.len() as u64;
        if size > self.max_file_size {
            return Err(DocumentError::TooLarge {
                size,
                max: self.max_file_size,
            }
            .into());
        }

        let decoder = match kind {
            SourceKind::Pdf => Decoder::Pdf,
            _ => Decoder::Utf8,
        };
        self.decode(data, decoder, kind)
    }

    fn decode(&self, data: &[u8], decoder: Decoder, kind: SourceKind) -> Result<RawDocument> {
        let text = match decoder {
            Decoder::Pdf => extract_pdf_text(data)?,
            Decoder::Utf8 => String::from_utf8_lossy(data).into_owned(),
        };
        debug!(bytes = data.len(), chars = text.len(), ?kind, "Decoded document");

        Ok(RawDocument::new(text).with_source_kind(kind))
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}
