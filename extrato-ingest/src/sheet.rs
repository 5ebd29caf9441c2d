//! Spreadsheet serialization: every sheet, in workbook order, becomes a
//! `Sheet: <name>` line followed by its raw rows, cells joined with spaces.
//! No header normalization and no table-structure inference.

use std::io::Cursor;

use calamine::{Reader, open_workbook_auto_from_rs};

use crate::error::ExtractError;

/// Serialize an .xls or .xlsx workbook to plain text. The container kind is
/// autodetected from the bytes, so both formats share this path.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let mut out = String::new();
    for (name, range) in workbook.worksheets() {
        let rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect());
        out.push_str(&sheet_block(&name, rows));
    }

    Ok(out)
}

/// One sheet's block: name line, then one line per row.
fn sheet_block(name: &str, rows: impl Iterator<Item = Vec<String>>) -> String {
    let body: Vec<String> = rows.map(|cells| cells.join(" ")).collect();
    format!("Sheet: {}\n{}\n", name, body.join("\n"))
}
