//! Savings goals endpoints.

use api_types::goal::{
    Contribute, ContributionResult, GoalCreated, GoalListResponse, GoalNew, GoalProgress,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Goal, MoneyCents, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_goal(goal: Goal) -> GoalProgress {
    GoalProgress {
        id: goal.id,
        target_amount: goal.target.to_major(),
        current_amount: goal.current.to_major(),
        progress_percent: goal.progress_percent(),
        due_date: goal.due_date,
        is_completed: goal.is_completed,
        name: goal.name,
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<GoalListResponse>, ServerError> {
    let goals = state
        .engine
        .list_goals(user.id)
        .await?
        .into_iter()
        .map(map_goal)
        .collect();
    Ok(Json(GoalListResponse { goals }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<GoalNew>,
) -> Result<(StatusCode, Json<GoalCreated>), ServerError> {
    let goal = state
        .engine
        .create_goal(
            user.id,
            &payload.name,
            MoneyCents::new(payload.target_minor),
            payload.due_date.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(GoalCreated { id: goal.id })))
}

pub async fn contribute(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<Contribute>,
) -> Result<Json<ContributionResult>, ServerError> {
    let contribution = state
        .engine
        .contribute(user.id, goal_id, MoneyCents::new(payload.amount_minor))
        .await?;
    if contribution.just_completed {
        tracing::info!("goal {} completed", goal_id);
    }

    Ok(Json(ContributionResult {
        goal: map_goal(contribution.goal),
        just_completed: contribution.just_completed,
    }))
}
