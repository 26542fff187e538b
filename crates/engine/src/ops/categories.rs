use sea_orm::{Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Category, EngineError, ResultEngine, TransactionKind, categories,
    util::normalize_required_name,
};

use super::{Engine, with_tx};

impl Engine {
    /// Global categories plus the caller's custom ones, optionally narrowed
    /// to a single kind. Ordered by name.
    pub async fn list_categories(
        &self,
        user_id: Uuid,
        kind: Option<TransactionKind>,
    ) -> ResultEngine<Vec<Category>> {
        let mut query = categories::Entity::find().filter(
            Condition::any()
                .add(categories::Column::UserId.is_null())
                .add(categories::Column::UserId.eq(user_id)),
        );
        if let Some(kind) = kind {
            query = query.filter(categories::Column::Kind.eq(kind.as_str()));
        }

        query
            .order_by_asc(categories::Column::Name)
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    /// Create a category owned by `user_id`.
    ///
    /// Only the user's own categories are checked for a clashing name; a
    /// global category with the same name is allowed.
    pub async fn create_custom_category(
        &self,
        user_id: Uuid,
        name: &str,
        kind: &str,
    ) -> ResultEngine<Category> {
        let kind = TransactionKind::try_from(kind)?;
        let name = normalize_required_name(name, "category name")?;

        with_tx!(self, |db_tx| {
            let existing = categories::Entity::find()
                .filter(categories::Column::UserId.eq(user_id))
                .filter(categories::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(format!("category {name}")));
            }

            let key = format!("category {name}");
            let category = Category::new(name, kind, Some(user_id));
            categories::ActiveModel::from(&category)
                .insert(&db_tx)
                .await
                .map_err(|err| EngineError::unique_violation(err, key))?;
            Ok(category)
        })
    }

    /// Seed a category shared by every user.
    pub async fn create_global_category(&self, name: &str, kind: &str) -> ResultEngine<Category> {
        let kind = TransactionKind::try_from(kind)?;
        let name = normalize_required_name(name, "category name")?;

        with_tx!(self, |db_tx| {
            let category = Category::new(name, kind, None);
            categories::ActiveModel::from(&category)
                .insert(&db_tx)
                .await?;
            Ok(category)
        })
    }
}
