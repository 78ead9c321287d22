//! Input documents and extraction hints.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Where the plain text came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Pasted or uploaded plain text.
    #[default]
    PlainText,
    /// Text pulled out of a PDF.
    Pdf,
    /// Text exported from a word processor document.
    OfficeDocument,
}

impl SourceKind {
    /// Parse a kind from a user-facing name or file extension.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "text" | "txt" | "plain" | "plain_text" | "md" | "markdown" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "office" | "office_document" | "doc" | "docx" | "odt" | "rtf" => {
                Some(Self::OfficeDocument)
            }
            _ => None,
        }
    }
}

/// Optional information about the input that tunes normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionHints {
    pub source_kind: Option<SourceKind>,
}

impl ExtractionHints {
    pub fn new(source_kind: SourceKind) -> Self {
        Self {
            source_kind: Some(source_kind),
        }
    }

    /// The declared kind, plain text when nothing was declared.
    pub fn kind(&self) -> SourceKind {
        self.source_kind.unwrap_or_default()
    }
}

/// Plain text handed to the extractor for a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    text: String,
    source_kind: Option<SourceKind>,
}

impl RawDocument {
    /// Wrap already-decoded text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_kind: None,
        }
    }

    /// Declare where the text came from.
    pub fn with_source_kind(mut self, kind: SourceKind) -> Self {
        self.source_kind = Some(kind);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source_kind
    }

    /// Hints derived from the declared source kind.
    pub fn hints(&self) -> ExtractionHints {
        ExtractionHints {
            source_kind: self.source_kind,
        }
    }

    /// Number of non-whitespace characters.
    pub fn readable_len(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    /// Caller-side policy: reject documents with too little readable text.
    ///
    /// The extractor accepts anything; this is what a UI runs before calling
    /// it so the user can be asked to re-upload.
    pub fn ensure_readable(&self, min_len: usize) -> Result<&str, InputError> {
        let len = self.readable_len();
        if len < min_len {
            return Err(InputError::TooShort { len, min: min_len });
        }
        Ok(&self.text)
    }
}
