use std::cmp::Ordering;

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Contribution, EngineError, Goal, MoneyCents, ResultEngine, goals,
    util::{ensure_positive, normalize_required_name, parse_due_date},
};

use super::{Engine, with_tx};

/// Due date ascending with undated goals last; ties fall back to creation
/// time, then id.
fn by_due_date(a: &Goal, b: &Goal) -> Ordering {
    let due = match (a.due_date, b.due_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    due.then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

impl Engine {
    /// Open a new savings goal.
    ///
    /// `due_date` is ISO-8601; values without an offset are UTC and the
    /// instant must be strictly in the future.
    pub async fn create_goal(
        &self,
        user_id: Uuid,
        name: &str,
        target: MoneyCents,
        due_date: Option<&str>,
    ) -> ResultEngine<Goal> {
        ensure_positive(target, "target amount")?;
        let name = normalize_required_name(name, "goal name")?;
        let now = Utc::now();
        let due_date = due_date.map(|raw| parse_due_date(raw, now)).transpose()?;
        let goal = Goal::new(user_id, name, target, due_date, now)?;

        with_tx!(self, |db_tx| {
            goals::ActiveModel::from(&goal).insert(&db_tx).await?;
            Ok(goal)
        })
    }

    /// Add money to a goal of `user_id`.
    ///
    /// The goal lookup comes first, so an unknown goal is reported even when
    /// the amount is also invalid. The read and the write share one
    /// transaction; protection against concurrent contributions is left to
    /// the store's isolation level.
    pub async fn contribute(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        amount: MoneyCents,
    ) -> ResultEngine<Contribution> {
        with_tx!(self, |db_tx| {
            let model = goals::Entity::find_by_id(goal_id)
                .filter(goals::Column::UserId.eq(user_id))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("goal not exists".to_string()))?;

            let mut goal = Goal::from(model);
            let just_completed = goal.apply_contribution(amount)?;

            goals::ActiveModel {
                id: ActiveValue::Unchanged(goal.id),
                current_minor: ActiveValue::Set(goal.current.cents()),
                is_completed: ActiveValue::Set(goal.is_completed),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            Ok(Contribution {
                goal,
                just_completed,
            })
        })
    }

    /// Every goal of a user, soonest due first and undated goals last.
    pub async fn list_goals(&self, user_id: Uuid) -> ResultEngine<Vec<Goal>> {
        let mut goals: Vec<Goal> = goals::Entity::find()
            .filter(goals::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(Goal::from)
            .collect();
        goals.sort_by(by_due_date);
        Ok(goals)
    }
}
