//! The interpreter seam: raw statement text in, structured statement out.

use anyhow::Result;

use crate::statement::BankStatementData;

/// Converts raw extracted statement text into structured data, typically by
/// calling an external generative model. Narrow on purpose so the provider
/// can be swapped or stubbed in tests without touching application logic.
pub trait StatementInterpreter {
    fn interpret(&self, text: &str) -> Result<BankStatementData>;
}
