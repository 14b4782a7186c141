use std::fmt;
use std::io::Cursor;

use serde::{Deserialize, Serialize};

/// The closed set of document formats this system understands.
///
/// Matches are exhaustive everywhere the enum is consumed, so an
/// unhandled format is a compile error rather than a runtime fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizedFormat {
    Txt,
    Pdf,
    Docx,
    Xlsx,
    Csv,
    Json,
    Html,
    Xml,
    Jpeg,
    Png,
}

impl RecognizedFormat {
    /// Map a bare file extension (no leading dot) to a format, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "xlsx" => Some(Self::Xlsx),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "html" => Some(Self::Html),
            "xml" => Some(Self::Xml),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Derive a format from a file name's extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next().unwrap_or("");
        if ext == name {
            // No dot at all — nothing to go on.
            return None;
        }
        Self::from_extension(ext)
    }

    /// Content-signature sniffing over a downloaded buffer.
    ///
    /// Office formats share the ZIP container signature, so those are told
    /// apart by the archive's entry prefixes (`word/` vs `xl/`).
    pub fn from_signature(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        if bytes.starts_with(b"PK\x03\x04") {
            return Self::from_zip_entries(bytes);
        }
        None
    }

    fn from_zip_entries(bytes: &[u8]) -> Option<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).ok()?;
        let mut format = None;
        for name in archive.file_names() {
            if name.starts_with("word/") {
                format = Some(Self::Docx);
                break;
            }
            if name.starts_with("xl/") {
                format = Some(Self::Xlsx);
                break;
            }
        }
        format
    }

    /// Map an HTTP `Content-Type` header to a format via its subtype.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let subtype = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .split('/')
            .nth(1)?
            .trim();
        match subtype {
            "plain" => Some(Self::Txt),
            "vnd.openxmlformats-officedocument.wordprocessingml.document" => Some(Self::Docx),
            "vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            other => Self::from_extension(other),
        }
    }

    /// Canonical extension, used when renaming acquired files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for RecognizedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
