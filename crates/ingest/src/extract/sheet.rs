use std::io::Cursor;

use calamine::{Data, Reader};

use crate::error::IngestError;
use crate::format::RecognizedFormat;

/// Flatten a workbook to delimited text, one `Sheet: <name>` block per
/// sheet in workbook order, blocks separated by a blank line.
pub fn extract_workbook(bytes: &[u8]) -> Result<String, IngestError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| IngestError::extraction(RecognizedFormat::Xlsx, e))?;

    let mut content = String::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IngestError::extraction(RecognizedFormat::Xlsx, e))?;

        content.push_str(&format!("Sheet: {sheet_name}\n"));
        for row in range.rows() {
            let cells: Vec<String> = row.iter().map(render_cell).collect();
            content.push_str(&cells.join(","));
            content.push('\n');
        }
        content.push('\n');
    }

    Ok(content)
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
