mod docx;
mod image;
mod pdf;
mod sheet;
mod tabular;
mod text;

use crate::error::IngestError;
use crate::format::RecognizedFormat;

/// Extract text from file bytes for a known format.
///
/// Pure routing: the match is exhaustive over [`RecognizedFormat`], so
/// every recognized format has exactly one decoder and nothing falls
/// through. All format inference happens before this point.
pub async fn extract_text(bytes: &[u8], format: RecognizedFormat) -> Result<String, IngestError> {
    match format {
        RecognizedFormat::Txt | RecognizedFormat::Html | RecognizedFormat::Xml => {
            text::decode(bytes)
        }
        RecognizedFormat::Pdf => pdf::extract_pdf(bytes),
        RecognizedFormat::Docx => docx::extract_docx(bytes),
        RecognizedFormat::Xlsx => sheet::extract_workbook(bytes),
        RecognizedFormat::Csv => tabular::csv_to_json_text(bytes),
        RecognizedFormat::Json => tabular::reindent_json(bytes),
        RecognizedFormat::Jpeg | RecognizedFormat::Png => image::recognize(bytes, format).await,
    }
}
