//! Application view state: a four-way sum type driving which panel is shown.
//!
//! Each variant carries only the fields meaningful to it, so combinations
//! like "error without a message" cannot be constructed. Nothing here
//! survives the process; there is no persistence of statement data.

use crate::filter::{FilterStats, filter_transactions, filter_stats};
use crate::statement::{BankStatementData, Transaction};

/// Data shown while a statement is loaded: the statement itself plus the
/// live search term.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub data: BankStatementData,
    pub search_term: String,
}

impl Dashboard {
    pub fn new(data: BankStatementData) -> Self {
        Self {
            data,
            search_term: String::new(),
        }
    }

    /// Filtered view of the statement under the current search term.
    pub fn filtered(&self) -> Vec<&Transaction> {
        filter_transactions(&self.data.transactions, &self.search_term)
    }

    pub fn stats(&self) -> FilterStats {
        filter_stats(&self.filtered())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AppView {
    #[default]
    Idle,
    Loading,
    Loaded(Dashboard),
    Error {
        message: String,
    },
}

impl AppView {
    /// Upload selected: enter Loading. Any previous error or statement is
    /// discarded before extraction begins.
    pub fn begin_upload(&mut self) {
        *self = AppView::Loading;
    }

    /// Extraction + interpretation succeeded.
    pub fn finish(&mut self, data: BankStatementData) {
        *self = AppView::Loaded(Dashboard::new(data));
    }

    /// Any failure in extraction or interpretation.
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = AppView::Error {
            message: message.into(),
        };
    }

    /// User retry (from Error) or reset (from Loaded). Clears statement
    /// data and search term.
    pub fn reset(&mut self) {
        *self = AppView::Idle;
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            AppView::Loaded(d) => Some(d),
            _ => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match self {
            AppView::Loaded(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::TransactionKind;

    fn statement() -> BankStatementData {
        BankStatementData {
            bank_name: "Banco X".to_string(),
            period: "jan/2024".to_string(),
            transactions: vec![Transaction {
                date: "01/01/2024".to_string(),
                description: "Salário".to_string(),
                amount: 2000.0,
                kind: TransactionKind::Credit,
            }],
        }
    }

    #[test]
    fn test_upload_success_flow() {
        let mut view = AppView::Idle;
        view.begin_upload();
        assert_eq!(view, AppView::Loading);

        view.finish(statement());
        let dash = view.dashboard().unwrap();
        assert_eq!(dash.data.bank_name, "Banco X");
        assert_eq!(dash.search_term, "");
    }

    #[test]
    fn test_upload_failure_flow() {
        let mut view = AppView::Idle;
        view.begin_upload();
        view.fail("Falha ao processar o extrato com IA.");
        assert_eq!(
            view,
            AppView::Error {
                message: "Falha ao processar o extrato com IA.".to_string()
            }
        );

        // Retry returns to Idle.
        view.reset();
        assert_eq!(view, AppView::Idle);
    }

    #[test]
    fn test_new_upload_discards_previous_error() {
        let mut view = AppView::Error {
            message: "anterior".to_string(),
        };
        view.begin_upload();
        assert_eq!(view, AppView::Loading);
    }

    #[test]
    fn test_reset_clears_data_and_search_term() {
        let mut view = AppView::Loading;
        view.finish(statement());
        view.dashboard_mut().unwrap().search_term = "sal".to_string();

        view.reset();
        assert_eq!(view, AppView::Idle);
        assert!(view.dashboard().is_none());
    }

    #[test]
    fn test_dashboard_filtering() {
        let mut dash = Dashboard::new(statement());
        assert_eq!(dash.stats().count, 1);

        dash.search_term = "mercado".to_string();
        assert!(dash.filtered().is_empty());
        assert_eq!(dash.stats().total, 0.0);
    }
}
