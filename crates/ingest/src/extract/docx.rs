use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::IngestError;
use crate::format::RecognizedFormat;

/// Extract raw text from a word-processor document, discarding styling.
///
/// Walks paragraph → run → text, one line per paragraph.
pub fn extract_docx(bytes: &[u8]) -> Result<String, IngestError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| IngestError::extraction(RecognizedFormat::Docx, e))?;

    let mut lines: Vec<String> = Vec::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for pc in paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in run.children {
                        if let RunChild::Text(t) = rc {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            lines.push(line);
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_with_extraction_error() {
        let err = extract_docx(b"not a zip archive").unwrap_err();
        assert!(matches!(err, IngestError::Extraction { format: RecognizedFormat::Docx, .. }));
    }
}
