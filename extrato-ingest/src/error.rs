use thiserror::Error;

/// Extraction failures. The first two carry the user-facing messages shown
/// by the application; reader failures bubble up from the underlying
/// libraries unchanged.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Formato de arquivo não suportado. Use PDF ou Excel.")]
    UnsupportedFormat,

    /// Raised by the caller when the extracted text is blank after trimming.
    #[error("O arquivo parece estar vazio ou não pôde ser lido.")]
    EmptyDocument,

    #[error("falha ao ler PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("falha ao ler planilha: {0}")]
    Sheet(#[from] calamine::Error),
}
