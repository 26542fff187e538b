//! Savings goals.
//!
//! A goal moves from [`GoalStatus::Active`] to [`GoalStatus::Completed`] the
//! first time its accumulated amount reaches the target. `Completed` is
//! terminal, and the current amount is never stored above the target.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, util::ensure_positive};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target: MoneyCents,
    pub current: MoneyCents,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a contribution: the updated goal and whether this contribution
/// is the one that completed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub goal: Goal,
    pub just_completed: bool,
}

impl Goal {
    pub fn new(
        user_id: Uuid,
        name: String,
        target: MoneyCents,
        due_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        ensure_positive(target, "target amount")?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            target,
            current: MoneyCents::ZERO,
            due_date,
            is_completed: false,
            created_at,
        })
    }

    pub fn status(&self) -> GoalStatus {
        if self.is_completed {
            GoalStatus::Completed
        } else {
            GoalStatus::Active
        }
    }

    /// Adds `amount` to the goal, clamping at the target.
    ///
    /// Returns `true` only on the Active → Completed transition.
    pub(crate) fn apply_contribution(&mut self, amount: MoneyCents) -> ResultEngine<bool> {
        ensure_positive(amount, "contribution")?;

        let next = self
            .current
            .checked_add(amount)
            .ok_or_else(|| EngineError::InvalidAmount("contribution too large".to_string()))?;

        if next >= self.target {
            let was_completed = self.is_completed;
            self.current = self.target;
            self.is_completed = true;
            return Ok(!was_completed);
        }

        self.current = next;
        Ok(false)
    }

    /// Progress as a percentage of the target, rounded half-up to two
    /// decimals. A zero target yields 0.
    pub fn progress_percent(&self) -> f64 {
        let target = i128::from(self.target.cents());
        if target <= 0 {
            return 0.0;
        }
        let current = i128::from(self.current.cents());
        // Hundredths of a percent: current / target * 100 * 100.
        let hundredths = (current * 20_000 + target) / (2 * target);
        hundredths as f64 / 100.0
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_minor: i64,
    pub current_minor: i64,
    pub due_date: Option<DateTimeUtc>,
    pub is_completed: bool,
    pub created_at: DateTimeUtc,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Goal> for ActiveModel {
    fn from(goal: &Goal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id),
            user_id: ActiveValue::Set(goal.user_id),
            name: ActiveValue::Set(goal.name.clone()),
            target_minor: ActiveValue::Set(goal.target.cents()),
            current_minor: ActiveValue::Set(goal.current.cents()),
            due_date: ActiveValue::Set(goal.due_date),
            is_completed: ActiveValue::Set(goal.is_completed),
            created_at: ActiveValue::Set(goal.created_at),
        }
    }
}

impl From<Model> for Goal {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            target: MoneyCents::new(model.target_minor),
            current: MoneyCents::new(model.current_minor),
            due_date: model.due_date,
            is_completed: model.is_completed,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target_cents: i64) -> Goal {
        Goal::new(
            Uuid::new_v4(),
            "Trip".to_string(),
            MoneyCents::new(target_cents),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_goal_is_active_and_empty() {
        let goal = goal(500_00);
        assert_eq!(goal.current, MoneyCents::ZERO);
        assert_eq!(goal.status(), GoalStatus::Active);
        assert_eq!(goal.progress_percent(), 0.0);
    }

    #[test]
    fn zero_target_is_rejected() {
        let err = Goal::new(
            Uuid::new_v4(),
            "Nothing".to_string(),
            MoneyCents::ZERO,
            None,
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("target amount must be positive".to_string())
        );
    }

    #[test]
    fn reaching_target_completes_once() {
        let mut goal = goal(500_00);
        assert!(!goal.apply_contribution(MoneyCents::new(400_00)).unwrap());
        assert_eq!(goal.status(), GoalStatus::Active);

        assert!(goal.apply_contribution(MoneyCents::new(100_00)).unwrap());
        assert_eq!(goal.current, MoneyCents::new(500_00));
        assert_eq!(goal.status(), GoalStatus::Completed);

        assert!(!goal.apply_contribution(MoneyCents::new(50_00)).unwrap());
        assert_eq!(goal.current, MoneyCents::new(500_00));
        assert!(goal.is_completed);
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut goal = goal(200_00);
        assert!(goal.apply_contribution(MoneyCents::new(999_99)).unwrap());
        assert_eq!(goal.current, goal.target);
        assert_eq!(goal.progress_percent(), 100.0);
    }

    #[test]
    fn non_positive_contribution_leaves_goal_untouched() {
        let mut goal = goal(200_00);
        assert!(goal.apply_contribution(MoneyCents::ZERO).is_err());
        assert!(goal.apply_contribution(MoneyCents::new(-1)).is_err());
        assert_eq!(goal.current, MoneyCents::ZERO);
    }

    #[test]
    fn progress_rounds_half_up_to_two_decimals() {
        let mut goal = goal(1000_00);
        goal.current = MoneyCents::new(500_00);
        assert_eq!(goal.progress_percent(), 50.0);

        let mut goal = goal_with(3_00, 1_00);
        assert_eq!(goal.progress_percent(), 33.33);
        goal.current = MoneyCents::new(2_00);
        assert_eq!(goal.progress_percent(), 66.67);
    }

    #[test]
    fn progress_is_zero_for_zero_target() {
        let goal = goal_with(0, 0);
        assert_eq!(goal.progress_percent(), 0.0);
    }

    fn goal_with(target_cents: i64, current_cents: i64) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "raw".to_string(),
            target: MoneyCents::new(target_cents),
            current: MoneyCents::new(current_cents),
            due_date: None,
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}
