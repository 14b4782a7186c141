use serde::Serialize;

use crate::error::IngestError;
use crate::extract;
use crate::format::RecognizedFormat;
use crate::staging::StagedFile;

/// One uploaded file, staged on local storage, with its format already
/// validated. Constructing a `RawFile` is the unsupported-format gate:
/// it runs before any extraction work.
#[derive(Debug)]
pub struct RawFile {
    pub staged: StagedFile,
    pub original_name: String,
    pub format: RecognizedFormat,
}

impl RawFile {
    pub fn new(staged: StagedFile, original_name: impl Into<String>) -> Result<Self, IngestError> {
        let original_name = original_name.into();
        let format = RecognizedFormat::from_name(&original_name)
            .ok_or_else(|| IngestError::UnsupportedFormat(original_name.clone()))?;
        Ok(Self {
            staged,
            original_name,
            format,
        })
    }
}

/// N input files merged into one logical titled document.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedDocument {
    pub title: String,
    pub text_content: String,
}

/// Extract every file in input order and concatenate the results into one
/// titled document.
///
/// Files are processed strictly in sequence so section order and title
/// order always match arrival order. The batch is consumed: every staged
/// file is removed when this returns, whether it succeeded or not.
pub async fn compose(files: Vec<RawFile>) -> Result<ComposedDocument, IngestError> {
    if files.is_empty() {
        return Err(IngestError::NoFilesProvided);
    }

    let mut title = String::new();
    let mut text_content = String::new();

    for file in &files {
        let bytes = tokio::fs::read(file.staged.path()).await?;
        let text = extract::extract_text(&bytes, file.format)
            .await
            .map_err(|e| e.for_file(&file.original_name))?;

        title.push_str(&file.original_name);
        title.push_str(", ");
        text_content.push_str(&format!("File: {}\n{}\n\n", file.original_name, text));
    }

    title.truncate(title.len() - 2);

    Ok(ComposedDocument {
        title,
        text_content,
    })
}
