//! End-to-end flow over the view state: load a statement, search, read the
//! derived stats, reset.

use extrato_core::{
    AppView, BankStatementData, Transaction, TransactionKind, filter_stats, filter_transactions,
};

fn statement() -> BankStatementData {
    BankStatementData {
        bank_name: "Banco Exemplo".to_string(),
        period: "01/01/2024 - 31/01/2024".to_string(),
        transactions: vec![
            Transaction {
                date: "01/01/2024".to_string(),
                description: "Mercado X".to_string(),
                amount: 50.00,
                kind: TransactionKind::Debit,
            },
            Transaction {
                date: "02/01/2024".to_string(),
                description: "Salário".to_string(),
                amount: 2000.00,
                kind: TransactionKind::Credit,
            },
        ],
    }
}

#[test]
fn test_load_search_reset_cycle() {
    let mut view = AppView::Idle;

    view.begin_upload();
    view.finish(statement());

    // Unfiltered stats over the loaded statement.
    {
        let dash = view.dashboard().unwrap();
        let stats = dash.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total, 2050.00);
    }

    // Narrow the search.
    view.dashboard_mut().unwrap().search_term = "sal".to_string();
    {
        let dash = view.dashboard().unwrap();
        let filtered = dash.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].description, "Salário");
        assert_eq!(filtered[0].kind, TransactionKind::Credit);

        let stats = dash.stats();
        assert_eq!(stats.total, 2000.00);
        assert_eq!(stats.count, 1);
    }

    // Reset discards data and search term; nothing is left to export.
    view.reset();
    assert_eq!(view, AppView::Idle);
    assert!(view.dashboard().is_none());
}

#[test]
fn test_filtered_is_order_preserving_subsequence() {
    let data = statement();
    for term in ["", "  ", "a", "sal", "x", "nada-que-exista"] {
        let filtered = filter_transactions(&data.transactions, term);

        // Every filtered element appears in the original, in the same order.
        let mut cursor = 0;
        for t in &filtered {
            let pos = data.transactions[cursor..]
                .iter()
                .position(|orig| orig == *t)
                .expect("filtered element missing from original");
            cursor += pos + 1;
        }

        assert_eq!(filter_stats(&filtered).count, filtered.len());
    }
}

#[test]
fn test_interpreter_reply_feeds_the_dashboard() {
    // The wire shape the interpreter returns, fed straight into the view.
    let json = r#"{
        "bankName": "Banco Exemplo",
        "period": "jan/2024",
        "transactions": [
            {"date": "05/01/2024", "description": "PIX enviado", "amount": 75.5, "type": "DEBIT"}
        ]
    }"#;
    let data: BankStatementData = serde_json::from_str(json).unwrap();

    let mut view = AppView::Loading;
    view.finish(data);

    let dash = view.dashboard().unwrap();
    assert_eq!(dash.stats().total, 75.5);
    assert_eq!(dash.filtered()[0].kind, TransactionKind::Debit);
}
