//! Categories API endpoints.

use api_types::category::{CategoryCreate, CategoryListResponse, CategoryQuery, CategoryView};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use engine::{TransactionKind, User};

use crate::{ServerError, server::ServerState, transactions::map_kind};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        is_custom: category.is_custom(),
        name: category.name,
        kind: map_kind(category.kind),
    }
}

/// Unrecognized `type` values list everything.
pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let kind = query
        .kind
        .as_deref()
        .and_then(|raw| TransactionKind::try_from(raw).ok());
    let categories = state
        .engine
        .list_categories(user.id, kind)
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(CategoryListResponse { categories }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_custom_category(user.id, &payload.name, &payload.kind)
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}
