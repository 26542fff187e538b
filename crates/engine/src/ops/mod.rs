use sea_orm::DatabaseConnection;

mod balances;
mod categories;
mod goals;
mod ledger;
mod reports;
mod users;

pub use balances::Balance;
pub use ledger::{LedgerEntry, NewTransaction, TransactionUpdate, UNCATEGORIZED_NAME};
pub use reports::{RECENT_TRANSACTIONS_LIMIT, Report, ReportPeriod};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// Early returns (`?`) drop the transaction, which rolls it back.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point of every bookkeeping operation.
///
/// The engine holds no state besides the connection pool: each call acquires
/// a connection, runs in its own transaction and releases it on return.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> crate::ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
