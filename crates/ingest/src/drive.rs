use std::path::PathBuf;

use chrono::Utc;
use futures::StreamExt;
use regex::Regex;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::compose::ComposedDocument;
use crate::error::IngestError;
use crate::extract;
use crate::format::RecognizedFormat;
use crate::staging::StagedFile;

/// Longest stem kept when deriving a file name from document text.
const MAX_STEM_LEN: usize = 40;

/// Resolves a Google Drive sharable link to a single-file document.
pub struct DriveAcquirer {
    client: reqwest::Client,
    uploads_dir: PathBuf,
    link_pattern: Regex,
}

/// A composed document whose staged source file outlives composition:
/// the file is removed when this value drops, i.e. after the caller has
/// persisted (or failed to persist) the document.
pub struct AcquiredDocument {
    pub document: ComposedDocument,
    _staged: StagedFile,
}

impl DriveAcquirer {
    pub fn new(uploads_dir: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            uploads_dir,
            link_pattern: Regex::new(r"^https?://drive\.google\.com/file/d/([\w-]+)/.*$")
                .expect("drive link pattern is valid"),
        }
    }

    /// Validate the sharable-link pattern and pull out the file id.
    /// Anything else is rejected here, before any network call.
    pub fn file_id(&self, link: &str) -> Result<String, IngestError> {
        self.link_pattern
            .captures(link)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| IngestError::InvalidLink(link.to_string()))
    }

    /// Download the linked file, infer its format, extract its text, and
    /// return it as a single-file document titled after the derived name.
    pub async fn acquire(&self, link: &str) -> Result<AcquiredDocument, IngestError> {
        let file_id = self.file_id(link)?;
        let url = format!("https://drive.google.com/uc?id={file_id}&export=download");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Stream to a staged file and await full completion before reading.
        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        let temp_path = self
            .uploads_dir
            .join(format!("{}-drive-file", Utc::now().timestamp_millis()));
        let mut staged = self.download_to(response, temp_path).await?;

        let bytes = tokio::fs::read(staged.path()).await?;
        let format = resolve_format(&bytes, content_type.as_deref())?;
        let text = extract::extract_text(&bytes, format).await?;

        // Name the document after the first word of its text, with a
        // uniqueness suffix and the resolved extension.
        let stem = sanitize_stem(text.split_whitespace().next().unwrap_or(""));
        let name = format!(
            "{stem}-{}.{}",
            Utc::now().timestamp_millis(),
            format.extension()
        );
        staged.rename(self.uploads_dir.join(&name)).await?;
        info!("Acquired Drive file {} as '{}' ({} chars)", file_id, name, text.len());

        Ok(AcquiredDocument {
            document: ComposedDocument {
                title: name,
                text_content: text,
            },
            _staged: staged,
        })
    }

    async fn download_to(
        &self,
        response: reqwest::Response,
        path: PathBuf,
    ) -> Result<StagedFile, IngestError> {
        let mut out = tokio::fs::File::create(&path).await?;
        let staged = StagedFile::new(path);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            out.write_all(&chunk?).await?;
        }
        out.flush().await?;
        Ok(staged)
    }
}

/// Content-signature sniffing first; transport content-type as fallback.
fn resolve_format(
    bytes: &[u8],
    content_type: Option<&str>,
) -> Result<RecognizedFormat, IngestError> {
    if let Some(format) = RecognizedFormat::from_signature(bytes) {
        return Ok(format);
    }
    match content_type {
        Some(ct) => RecognizedFormat::from_content_type(ct)
            .ok_or_else(|| IngestError::UnsupportedFormat(ct.to_string())),
        None => Err(IngestError::UnableToDetermineFormat),
    }
}

/// Reduce a word of extracted text to something safe to use in a file
/// name: alphanumerics kept, everything else collapsed to single dashes.
/// Falls back to the literal `File` when nothing survives.
fn sanitize_stem(word: &str) -> String {
    let mut stem = String::new();
    let mut last_was_dash = false;
    for c in word.chars().take(MAX_STEM_LEN) {
        if c.is_alphanumeric() {
            stem.push(c);
            last_was_dash = false;
        } else if !last_was_dash && !stem.is_empty() {
            stem.push('-');
            last_was_dash = true;
        }
    }
    let stem = stem.trim_end_matches('-');
    if stem.is_empty() {
        "File".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acquirer() -> DriveAcquirer {
        DriveAcquirer::new(std::env::temp_dir())
    }

    #[test]
    fn accepts_sharable_links() {
        let id = acquirer()
            .file_id("https://drive.google.com/file/d/1AbC_d-93xYz/view?usp=sharing")
            .unwrap();
        assert_eq!(id, "1AbC_d-93xYz");
    }

    #[test]
    fn rejects_non_drive_urls_without_network() {
        let err = acquirer().file_id("https://example.com/file/d/abc/view").unwrap_err();
        assert!(matches!(err, IngestError::InvalidLink(_)));

        let err = acquirer().file_id("not a url at all").unwrap_err();
        assert!(matches!(err, IngestError::InvalidLink(_)));
    }

    #[test]
    fn rejects_drive_urls_without_file_segment() {
        let err = acquirer().file_id("https://drive.google.com/drive/folders/xyz").unwrap_err();
        assert!(matches!(err, IngestError::InvalidLink(_)));
    }

    #[test]
    fn signature_beats_content_type() {
        let format = resolve_format(b"%PDF-1.4 ...", Some("text/plain")).unwrap();
        assert_eq!(format, RecognizedFormat::Pdf);
    }

    #[test]
    fn content_type_is_the_fallback() {
        let format = resolve_format(b"hello world", Some("application/json")).unwrap();
        assert_eq!(format, RecognizedFormat::Json);
    }

    #[test]
    fn unsupported_content_type_is_reported() {
        let err = resolve_format(b"...", Some("application/octet-stream")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat(_)));
    }

    #[test]
    fn no_signal_at_all_is_indeterminate() {
        let err = resolve_format(b"no signature here", None).unwrap_err();
        assert!(matches!(err, IngestError::UnableToDetermineFormat));
    }

    #[test]
    fn stem_keeps_word_and_drops_unsafe_chars() {
        assert_eq!(sanitize_stem("Invoice"), "Invoice");
        assert_eq!(sanitize_stem("a/b\\c:d"), "a-b-c-d");
        assert_eq!(sanitize_stem("..."), "File");
        assert_eq!(sanitize_stem(""), "File");
    }

    #[test]
    fn stem_is_bounded() {
        let long = "x".repeat(200);
        assert_eq!(sanitize_stem(&long).len(), MAX_STEM_LEN);
    }
}
