//! PDF text extraction.

use tracing::debug;

/// Extract text from PDF bytes. Any parser failure degrades to `None`;
/// document fallbacks are best-effort by contract.
pub fn extract_text(bytes: &[u8]) -> Option<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(err) => {
            debug!(%err, "pdf text extraction failed");
            None
        }
    }
}
