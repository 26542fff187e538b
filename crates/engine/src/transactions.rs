//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense event owned by a user. The
//! amount is always positive; the kind carries the direction.

use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::ensure_positive};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    /// Accepts the canonical names and the legacy Spanish labels
    /// (`Ingreso`/`Gasto`), case-insensitive.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "income" | "ingreso" => Ok(Self::Income),
            "expense" | "gasto" => Ok(Self::Expense),
            _ => Err(EngineError::InvalidInput(format!(
                "invalid transaction type: {value}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        kind: TransactionKind,
        amount: MoneyCents,
        description: Option<String>,
        category_id: Option<Uuid>,
        occurred_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        ensure_positive(amount, "amount")?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            amount,
            description,
            category_id,
            occurred_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub occurred_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id),
            user_id: ActiveValue::Set(tx.user_id),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            description: ActiveValue::Set(tx.description.clone()),
            category_id: ActiveValue::Set(tx.category_id),
            occurred_at: ActiveValue::Set(tx.occurred_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: MoneyCents::new(model.amount_minor),
            description: model.description,
            category_id: model.category_id,
            occurred_at: model.occurred_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_accepts_canonical_and_legacy_labels() {
        assert_eq!(
            TransactionKind::try_from("income").unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            TransactionKind::try_from("Ingreso").unwrap(),
            TransactionKind::Income
        );
        assert_eq!(
            TransactionKind::try_from("GASTO").unwrap(),
            TransactionKind::Expense
        );
        assert_eq!(
            TransactionKind::try_from(" Expense ").unwrap(),
            TransactionKind::Expense
        );
    }

    #[test]
    fn kind_rejects_unknown_values() {
        assert!(matches!(
            TransactionKind::try_from("transfer"),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(TransactionKind::try_from("").is_err());
    }

    #[test]
    fn new_rejects_non_positive_amounts() {
        let user_id = Uuid::new_v4();
        for cents in [0, -1, -10_000] {
            let err = Transaction::new(
                user_id,
                TransactionKind::Expense,
                MoneyCents::new(cents),
                None,
                None,
                Utc::now(),
            )
            .unwrap_err();
            assert!(err.is_validation());
        }
    }
}
