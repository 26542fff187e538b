//! Bookkeeping core: users, categories, the transaction ledger, balances,
//! savings goals and reports.
//!
//! Every operation goes through [`Engine`], which owns the database pool and
//! runs each call in its own transaction.

pub use categories::Category;
pub use error::EngineError;
pub use goals::{Contribution, Goal, GoalStatus};
pub use money::MoneyCents;
pub use ops::{
    Balance, Engine, EngineBuilder, LedgerEntry, NewTransaction, RECENT_TRANSACTIONS_LIMIT, Report,
    ReportPeriod, TransactionUpdate, UNCATEGORIZED_NAME,
};
pub use transactions::{Transaction, TransactionKind};
pub use users::User;
pub use util::parse_iso_datetime;

mod categories;
mod error;
mod goals;
mod money;
mod ops;
mod password;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
