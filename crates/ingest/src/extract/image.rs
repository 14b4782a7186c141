use tokio::process::Command;
use uuid::Uuid;

use crate::error::IngestError;
use crate::format::RecognizedFormat;
use crate::staging::StagedFile;

const OCR_LANG: &str = "eng";

/// Run optical character recognition over an image via the system
/// `tesseract` binary.
///
/// By far the slowest extraction path; the subprocess is awaited so other
/// requests keep making progress while recognition runs.
pub async fn recognize(bytes: &[u8], format: RecognizedFormat) -> Result<String, IngestError> {
    let path = std::env::temp_dir().join(format!("ocr-{}.{}", Uuid::new_v4(), format.extension()));
    let staged = StagedFile::create(path, bytes).await?;

    let output = Command::new("tesseract")
        .arg(staged.path())
        .arg("stdout")
        .arg("-l")
        .arg(OCR_LANG)
        .output()
        .await
        .map_err(|e| {
            IngestError::extraction(
                format,
                format!("failed to run tesseract: {e} (install tesseract-ocr for image support)"),
            )
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IngestError::extraction(
            format,
            format!("tesseract failed: {}", stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
