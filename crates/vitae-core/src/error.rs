//! Error types for the vitae-core library.
//!
//! Extraction itself never fails; these errors belong to the surfaces around
//! it (loading documents, caller input policy, configuration files).

use thiserror::Error;

/// Main error type for the vitae library.
#[derive(Error, Debug)]
pub enum VitaeError {
    /// Document loading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Input rejected by the caller-side readability policy.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to turning files into plain text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The file exceeds the configured size limit.
    #[error("file is too large ({size} bytes, limit is {max})")]
    TooLarge { size: u64, max: u64 },

    /// The file type is not one we can decode to text.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised by the input policy callers apply before extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Not enough readable text to be worth extracting.
    #[error("could not find readable text ({len} characters, need at least {min})")]
    TooShort { len: usize, min: usize },
}

/// Result type for the vitae library.
pub type Result<T> = std::result::Result<T, VitaeError>;
