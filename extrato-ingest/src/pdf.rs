//! PDF text extraction: decode the document in memory and serialize page
//! text in page order. No OCR, no layout inference.

use lopdf::Document;

use crate::error::ExtractError;

/// Extract the text of every page, in order from page 1 to N. Text runs
/// within a page are joined with single spaces; pages are separated by a
/// newline.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes)?;

    // get_pages is keyed by page number, so iteration follows page order.
    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        let text = doc.extract_text(&[*page_number])?;
        pages.push(text);
    }

    Ok(join_pages(&pages))
}

/// Collapse each page's internal whitespace to single spaces, then join the
/// pages with newlines.
fn join_pages(pages: &[String]) -> String {
    let mut out = String::new();
    for page in pages {
        let flat: Vec<&str> = page.split_whitespace().collect();
        out.push_str(&flat.join(" "));
        out.push('\n');
    }
    out
}
