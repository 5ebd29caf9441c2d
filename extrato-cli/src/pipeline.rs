//! The upload pipeline: read file, extract text, interpret. One sequential
//! request per upload; any failure discards the whole attempt.

use std::path::Path;

use anyhow::{Context, Result};

use extrato_core::{BankStatementData, StatementInterpreter};
use extrato_ingest::{ExtractError, FileFormat};

pub const FALLBACK_ERROR: &str = "Ocorreu um erro ao processar o arquivo.";

/// Run the full pipeline for one selected file.
pub fn process_upload(path: &Path, interpreter: &dyn StatementInterpreter) -> Result<BankStatementData> {
    let bytes = std::fs::read(path).with_context(|| format!("lendo {}", path.display()))?;

    let format = FileFormat::from_path(path)
        .or_else(|| FileFormat::sniff(&bytes))
        .ok_or(ExtractError::UnsupportedFormat)?;

    let text = extrato_ingest::extract_text(&bytes, format)?;
    interpret_extracted(&text, interpreter)
}

/// Post-extraction stage: blank-document check, then interpretation. The
/// interpreter is never reached for a blank document.
pub fn interpret_extracted(text: &str, interpreter: &dyn StatementInterpreter) -> Result<BankStatementData> {
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyDocument.into());
    }

    tracing::debug!(chars = text.len(), "texto extraído; enviando para interpretação");
    interpreter.interpret(text)
}

/// User-facing message for a pipeline failure: the failure's own message,
/// or a generic fallback when it carries none.
pub fn error_message(err: &anyhow::Error) -> String {
    let msg = err.to_string();
    if msg.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::PathBuf;

    use extrato_core::Transaction;
    use extrato_core::TransactionKind;

    /// Interpreter stub that records whether it was called.
    struct StubInterpreter {
        calls: Cell<usize>,
    }

    impl StubInterpreter {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl StatementInterpreter for StubInterpreter {
        fn interpret(&self, _text: &str) -> Result<BankStatementData> {
            self.calls.set(self.calls.get() + 1);
            Ok(BankStatementData {
                bank_name: "Banco Stub".to_string(),
                period: String::new(),
                transactions: vec![Transaction {
                    date: "01/01/2024".to_string(),
                    description: "PIX".to_string(),
                    amount: 10.0,
                    kind: TransactionKind::Credit,
                }],
            })
        }
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("extrato_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_unsupported_format_skips_interpreter() {
        let stub = StubInterpreter::new();
        let path = temp_file("nota.txt", b"apenas texto");

        let err = process_upload(&path, &stub).unwrap_err();
        assert_eq!(
            error_message(&err),
            "Formato de arquivo não suportado. Use PDF ou Excel."
        );
        assert_eq!(stub.calls.get(), 0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_blank_text_skips_interpreter() {
        let stub = StubInterpreter::new();
        let err = interpret_extracted("   \n\t", &stub).unwrap_err();
        assert_eq!(
            error_message(&err),
            "O arquivo parece estar vazio ou não pôde ser lido."
        );
        assert_eq!(stub.calls.get(), 0);
    }

    #[test]
    fn test_extracted_text_reaches_interpreter() {
        let stub = StubInterpreter::new();
        let data = interpret_extracted("PIX RECEBIDO 10,00", &stub).unwrap();
        assert_eq!(stub.calls.get(), 1);
        assert_eq!(data.bank_name, "Banco Stub");
        assert_eq!(data.transactions.len(), 1);
    }

    #[test]
    fn test_error_message_fallback() {
        let err = anyhow::anyhow!("");
        assert_eq!(error_message(&err), FALLBACK_ERROR);

        let err = anyhow::anyhow!("mensagem específica");
        assert_eq!(error_message(&err), "mensagem específica");
    }
}
