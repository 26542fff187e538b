use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, MoneyCents, ResultEngine, Transaction, TransactionKind, categories, transactions,
    util::{ensure_positive, normalize_optional_text},
};

use super::{Engine, with_tx};

/// Category label shown for transactions without a category.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Input of [`Engine::record_transaction`].
///
/// `kind` is raw user input and is validated by the engine.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub amount: MoneyCents,
    pub kind: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    /// Defaults to now (UTC).
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Input of [`Engine::update_transaction`]. Every field is overwritten.
#[derive(Clone, Debug)]
pub struct TransactionUpdate {
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

/// A transaction with its category name resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub transaction: Transaction,
    pub category_name: String,
}

impl LedgerEntry {
    fn from_row(
        (tx_model, category): (transactions::Model, Option<categories::Model>),
    ) -> ResultEngine<Self> {
        Ok(Self {
            transaction: Transaction::try_from(tx_model)?,
            category_name: category
                .map(|c| c.name)
                .unwrap_or_else(|| UNCATEGORIZED_NAME.to_string()),
        })
    }
}

pub(super) fn user_transactions_in_range(
    user_id: Uuid,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Select<transactions::Entity> {
    let mut query = transactions::Entity::find().filter(transactions::Column::UserId.eq(user_id));
    if let Some(from) = from {
        query = query.filter(transactions::Column::OccurredAt.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(transactions::Column::OccurredAt.lte(to));
    }
    query
}

impl Engine {
    /// Append an income or expense entry to the user's ledger.
    ///
    /// The category and user references are not looked up; the foreign keys
    /// guard them.
    pub async fn record_transaction(
        &self,
        user_id: Uuid,
        new: NewTransaction,
    ) -> ResultEngine<Transaction> {
        ensure_positive(new.amount, "amount")?;
        let kind = TransactionKind::try_from(new.kind.as_str())?;
        let tx = Transaction::new(
            user_id,
            kind,
            new.amount,
            normalize_optional_text(new.description.as_deref()),
            new.category_id,
            new.occurred_at.unwrap_or_else(Utc::now),
        )?;

        with_tx!(self, |db_tx| {
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            Ok(tx)
        })
    }

    /// The `limit` most recent transactions of a user, newest first.
    pub async fn list_recent(&self, user_id: Uuid, limit: u64) -> ResultEngine<Vec<LedgerEntry>> {
        user_transactions_in_range(user_id, None, None)
            .order_by_desc(transactions::Column::OccurredAt)
            .order_by_desc(transactions::Column::Id)
            .limit(limit)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?
            .into_iter()
            .map(LedgerEntry::from_row)
            .collect()
    }

    /// Every transaction of a user inside the inclusive `[from, to]` range,
    /// newest first.
    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> ResultEngine<Vec<LedgerEntry>> {
        user_transactions_in_range(user_id, from, to)
            .order_by_desc(transactions::Column::OccurredAt)
            .order_by_desc(transactions::Column::Id)
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?
            .into_iter()
            .map(LedgerEntry::from_row)
            .collect()
    }

    /// Overwrite amount, description and category of one of the user's
    /// transactions. Kind and timestamp are kept.
    pub async fn update_transaction(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
        update: TransactionUpdate,
    ) -> ResultEngine<Transaction> {
        ensure_positive(update.amount, "amount")?;

        with_tx!(self, |db_tx| {
            let model = self
                .require_owned_transaction(&db_tx, user_id, transaction_id)
                .await?;

            let mut active: transactions::ActiveModel = model.into();
            active.amount_minor = ActiveValue::Set(update.amount.cents());
            active.description =
                ActiveValue::Set(normalize_optional_text(update.description.as_deref()));
            active.category_id = ActiveValue::Set(update.category_id);
            let model = active.update(&db_tx).await?;
            Transaction::try_from(model)
        })
    }

    pub async fn delete_transaction(&self, user_id: Uuid, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_owned_transaction(&db_tx, user_id, transaction_id)
                .await?;
            model.delete(&db_tx).await?;
            Ok(())
        })
    }

    /// Fetch a transaction, hiding rows owned by other users.
    async fn require_owned_transaction(
        &self,
        db: &impl ConnectionTrait,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))
    }
}
