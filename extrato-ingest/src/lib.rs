//! extrato-ingest: uploaded-file text extraction (PDF and spreadsheet paths).

pub mod error;
pub mod format;
pub mod pdf;
pub mod sheet;

pub use error::ExtractError;
pub use format::FileFormat;

/// Extract plain text from file bytes according to the detected format.
///
/// Callers are expected to reject blank output with
/// [`ExtractError::EmptyDocument`]; this function only serializes.
pub fn extract_text(bytes: &[u8], format: FileFormat) -> Result<String, ExtractError> {
    match format {
        FileFormat::Pdf => pdf::extract_text(bytes),
        FileFormat::Xls | FileFormat::Xlsx => sheet::extract_text(bytes),
    }
}
