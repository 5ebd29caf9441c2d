//! Search filtering and summary aggregation over a statement.

use crate::statement::Transaction;

/// Summary over a filtered set of transactions.
///
/// `total` is the plain arithmetic sum of the stored magnitudes; it is NOT
/// signed by credit/debit. A statement with only debits therefore shows a
/// positive total. Product behavior, pinned by test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterStats {
    pub total: f64,
    pub count: usize,
}

/// Case-insensitive substring filter on `description` only.
///
/// A blank (empty or whitespace) term selects everything. The result is a
/// subsequence of the input, order preserved.
pub fn filter_transactions<'a>(transactions: &'a [Transaction], term: &str) -> Vec<&'a Transaction> {
    let term = term.trim();
    if term.is_empty() {
        return transactions.iter().collect();
    }

    let term = term.to_lowercase();
    transactions
        .iter()
        .filter(|t| t.description.to_lowercase().contains(&term))
        .collect()
}

/// Sum and count over an already-filtered set.
pub fn filter_stats(filtered: &[&Transaction]) -> FilterStats {
    FilterStats {
        total: filtered.iter().map(|t| t.amount).sum(),
        count: filtered.len(),
    }
}
