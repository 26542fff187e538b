use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, Transaction, TransactionKind};

use super::{Engine, ledger::user_transactions_in_range};

/// Income, expense and net totals over a set of transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub total_income: MoneyCents,
    pub total_expense: MoneyCents,
    pub net_balance: MoneyCents,
}

impl Balance {
    /// Sum transactions in integer cents.
    pub(crate) fn from_transactions<'a>(
        txs: impl IntoIterator<Item = &'a Transaction>,
    ) -> ResultEngine<Self> {
        let overflow = || EngineError::InvalidAmount("balance overflow".to_string());

        let (income, expense) = txs.into_iter().try_fold(
            (MoneyCents::ZERO, MoneyCents::ZERO),
            |(income, expense), tx| match tx.kind {
                TransactionKind::Income => income
                    .checked_add(tx.amount)
                    .map(|income| (income, expense))
                    .ok_or_else(overflow),
                TransactionKind::Expense => expense
                    .checked_add(tx.amount)
                    .map(|expense| (income, expense))
                    .ok_or_else(overflow),
            },
        )?;

        Ok(Self {
            total_income: income,
            total_expense: expense,
            net_balance: income.checked_sub(expense).ok_or_else(overflow)?,
        })
    }
}

impl Engine {
    /// Consolidated balance of a user over the inclusive `[from, to]` range.
    ///
    /// An empty range yields zero totals.
    pub async fn calculate_balance(
        &self,
        user_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> ResultEngine<Balance> {
        let txs = user_transactions_in_range(user_id, from, to)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Balance::from_transactions(&txs)
    }
}
