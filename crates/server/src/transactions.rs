//! Transactions API endpoints

use api_types::{
    TransactionKind as ApiKind,
    transaction::{
        DateRange, TransactionCreated, TransactionListResponse, TransactionNew,
        TransactionUpdate, TransactionView,
    },
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use engine::{LedgerEntry, MoneyCents, NewTransaction, User, parse_iso_datetime};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn map_entry(entry: LedgerEntry) -> TransactionView {
    let tx = entry.transaction;
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        amount: tx.amount.to_major(),
        description: tx.description,
        category_id: tx.category_id,
        category_name: entry.category_name,
        date: tx.occurred_at,
    }
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ServerError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Ok(Some(parse_iso_datetime(raw)?)),
        None => Ok(None),
    }
}

/// Inclusive bounds of a `start_date`/`end_date` query. Blank values are
/// ignored.
pub(crate) fn parse_range(
    range: &DateRange,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), ServerError> {
    Ok((
        parse_optional_date(range.start_date.as_deref())?,
        parse_optional_date(range.end_date.as_deref())?,
    ))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let occurred_at = parse_optional_date(payload.date.as_deref())?;
    let tx = state
        .engine
        .record_transaction(
            user.id,
            NewTransaction {
                amount: MoneyCents::new(payload.amount_minor),
                kind: payload.kind,
                description: payload.description,
                category_id: payload.category_id,
                occurred_at,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionCreated { id: tx.id })))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(range): Query<DateRange>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let (from, to) = parse_range(&range)?;
    let transactions = state
        .engine
        .list_transactions(user.id, from, to)
        .await?
        .into_iter()
        .map(map_entry)
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionCreated>, ServerError> {
    let tx = state
        .engine
        .update_transaction(
            user.id,
            transaction_id,
            engine::TransactionUpdate {
                amount: MoneyCents::new(payload.amount_minor),
                description: payload.description,
                category_id: payload.category_id,
            },
        )
        .await?;

    Ok(Json(TransactionCreated { id: tx.id }))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_transaction(user.id, transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
