//! Statement types as returned by the interpreter (wire schema included).

use serde::{Deserialize, Serialize};

/// Direction of a transaction. The stored amount is always a positive
/// magnitude; money in vs. money out is carried by this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    /// Localized label shown in the dashboard and the PDF report.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Credit => "Crédito",
            TransactionKind::Debit => "Débito",
        }
    }

    /// Display sign for monetary values, keyed on the tag (not on the
    /// stored amount, which is always positive).
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Credit => '+',
            TransactionKind::Debit => '-',
        }
    }
}

/// One statement line as extracted by the interpreter.
/// Immutable once produced; `date` is free-form text (typically DD/MM/YYYY).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    /// Always a non-negative magnitude; see [`TransactionKind`].
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// The structured result of interpreting one uploaded document.
/// Produced atomically by a single interpreter call; replaces any previous
/// value wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BankStatementData {
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub period: String,
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_interpreter_reply() {
        let json = r#"{
            "bankName": "Banco do Brasil",
            "period": "01/01/2024 - 31/01/2024",
            "transactions": [
                {"date": "02/01/2024", "description": "PIX recebido", "amount": 150.0, "type": "CREDIT"},
                {"date": "03/01/2024", "description": "Mercado X", "amount": 50.0, "type": "DEBIT"}
            ]
        }"#;

        let data: BankStatementData = serde_json::from_str(json).unwrap();
        assert_eq!(data.bank_name, "Banco do Brasil");
        assert_eq!(data.transactions.len(), 2);
        assert_eq!(data.transactions[0].kind, TransactionKind::Credit);
        assert_eq!(data.transactions[1].amount, 50.0);
    }

    #[test]
    fn test_bank_name_and_period_are_optional() {
        let json = r#"{"transactions": []}"#;
        let data: BankStatementData = serde_json::from_str(json).unwrap();
        assert!(data.bank_name.is_empty());
        assert!(data.period.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"transactions": [
            {"date": "01/01/2024", "description": "x", "amount": 1.0, "type": "TRANSFER"}
        ]}"#;
        assert!(serde_json::from_str::<BankStatementData>(json).is_err());
    }

    #[test]
    fn test_labels_and_signs() {
        assert_eq!(TransactionKind::Credit.label(), "Crédito");
        assert_eq!(TransactionKind::Debit.label(), "Débito");
        assert_eq!(TransactionKind::Credit.sign(), '+');
        assert_eq!(TransactionKind::Debit.sign(), '-');
    }
}
