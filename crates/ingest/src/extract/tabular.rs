use serde_json::{Map, Value};

use crate::error::IngestError;
use crate::format::RecognizedFormat;

/// Convert CSV to pretty-printed JSON text: the first row names the
/// columns, every following row becomes one object in an array.
///
/// This is an intentional format conversion, not a passthrough.
pub fn csv_to_json_text(bytes: &[u8]) -> Result<String, IngestError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| IngestError::extraction(RecognizedFormat::Csv, e))?
        .clone();

    let mut records: Vec<Value> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::extraction(RecognizedFormat::Csv, e))?;
        let mut row = Map::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), Value::String(field.to_string()));
        }
        records.push(Value::Object(row));
    }

    serde_json::to_string_pretty(&Value::Array(records))
        .map_err(|e| IngestError::extraction(RecognizedFormat::Csv, e))
}

/// Parse JSON and re-serialize with indentation. Normalizes formatting;
/// fails if the input is not valid JSON.
pub fn reindent_json(bytes: &[u8]) -> Result<String, IngestError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| IngestError::extraction(RecognizedFormat::Json, e))?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| IngestError::extraction(RecognizedFormat::Json, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_become_json_objects() {
        let text = csv_to_json_text(b"a,b\n1,2\n").unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!([{"a": "1", "b": "2"}]));
        // Pretty-printed, not compact.
        assert!(text.contains('\n'));
    }

    #[test]
    fn csv_with_multiple_rows_preserves_order() {
        let text = csv_to_json_text(b"name,age\nalice,30\nbob,41\n").unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"name": "alice", "age": "30"},
                {"name": "bob", "age": "41"},
            ])
        );
    }

    #[test]
    fn headers_only_csv_is_an_empty_array() {
        let text = csv_to_json_text(b"a,b\n").unwrap();
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), serde_json::json!([]));
    }

    #[test]
    fn json_reindent_preserves_semantics() {
        let input = b"{\"outer\":   {\"inner\":[1,2,   3]}}";
        let text = reindent_json(input).unwrap();
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        let original: Value = serde_json::from_slice(input).unwrap();
        assert_eq!(reparsed, original);
        assert_ne!(text, String::from_utf8_lossy(input));
    }

    #[test]
    fn invalid_json_fails() {
        let err = reindent_json(b"{not json").unwrap_err();
        assert!(matches!(err, IngestError::Extraction { format: RecognizedFormat::Json, .. }));
    }
}
