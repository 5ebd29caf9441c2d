//! extrato-core: statement types, view state, and pure derived computations.

pub mod filter;
pub mod interpret;
pub mod money;
pub mod statement;
pub mod view;

pub use filter::{FilterStats, filter_stats, filter_transactions};
pub use interpret::StatementInterpreter;
pub use money::format_brl;
pub use statement::{BankStatementData, Transaction, TransactionKind};
pub use view::{AppView, Dashboard};
