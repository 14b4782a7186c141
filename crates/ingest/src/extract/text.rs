use crate::error::IngestError;

/// Decode a buffer as UTF-8 text, verbatim.
///
/// Also covers HTML and XML, which are stored as raw markup with no tag
/// stripping. Invalid sequences fall back to lossy conversion.
pub fn decode(bytes: &[u8]) -> Result<String, IngestError> {
    Ok(String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned()))
}
