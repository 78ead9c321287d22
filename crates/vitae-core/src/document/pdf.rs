//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use crate::error::DocumentError;

/// Extract the text layer of a PDF.
///
/// The file is checked with lopdf first so that encrypted or page-less
/// documents produce a specific error instead of pdf-extract's generic one.
/// Documents encrypted with an empty user password are decrypted.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, DocumentError> {
    let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

    let decrypted;
    let bytes = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(DocumentError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| DocumentError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
        decrypted = buffer;
        decrypted.as_slice()
    } else {
        data
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(DocumentError::NoPages);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocumentError::TextExtraction(e.to_string()))?;

    debug!(pages = page_count, chars = text.len(), "Extracted PDF text");
    Ok(text)
}
