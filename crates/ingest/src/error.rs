use thiserror::Error;

use crate::format::RecognizedFormat;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Unable to determine file type")]
    UnableToDetermineFormat,

    #[error("Invalid Google Drive link: {0}")]
    InvalidLink(String),

    #[error("No files uploaded")]
    NoFilesProvided,

    #[error("{format} extraction failed: {reason}")]
    Extraction {
        format: RecognizedFormat,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),
}

impl IngestError {
    pub(crate) fn extraction(format: RecognizedFormat, reason: impl ToString) -> Self {
        Self::Extraction {
            format,
            reason: reason.to_string(),
        }
    }

    /// Prefix an extraction failure with the file it occurred in.
    pub(crate) fn for_file(self, name: &str) -> Self {
        match self {
            Self::Extraction { format, reason } => Self::Extraction {
                format,
                reason: format!("{name}: {reason}"),
            },
            other => other,
        }
    }
}
