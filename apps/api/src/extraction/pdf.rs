use crate::extraction::ExtractionError;

/// Extracts the text layer of a PDF held in memory.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}
