use crate::error::IngestError;
use crate::format::RecognizedFormat;

/// Extract all textual content from a PDF, concatenated in page order.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, IngestError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| IngestError::extraction(RecognizedFormat::Pdf, e))
}
