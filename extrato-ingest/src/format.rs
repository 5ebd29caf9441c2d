//! Typed upload formats. Adding a format means extending the enum and the
//! dispatch in `extract_text`, not sprinkling new MIME strings around.

use std::path::Path;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const MIME_XLS: &str = "application/vnd.ms-excel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Xls,
    Xlsx,
}

impl FileFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            MIME_PDF => Some(FileFormat::Pdf),
            MIME_XLS => Some(FileFormat::Xls),
            MIME_XLSX => Some(FileFormat::Xlsx),
            _ => None,
        }
    }

    /// Detect by file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(FileFormat::Pdf),
            "xls" => Some(FileFormat::Xls),
            "xlsx" => Some(FileFormat::Xlsx),
            _ => None,
        }
    }

    /// Detect by magic bytes: `%PDF`, the OLE2 header (legacy .xls), or the
    /// ZIP header (.xlsx). Fallback for files without a useful extension.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF") {
            Some(FileFormat::Pdf)
        } else if bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]) {
            Some(FileFormat::Xls)
        } else if bytes.starts_with(b"PK\x03\x04") {
            Some(FileFormat::Xlsx)
        } else {
            None
        }
    }
}
