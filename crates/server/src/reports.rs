//! Report endpoints.

use api_types::report::{PremiumReportView, RecentTransaction, ReportQuery, ReportView};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use engine::{EngineError, Report, ReportPeriod, User};

use crate::{
    ServerError, balance::map_balance, goals::map_goal, server::ServerState,
    transactions::map_kind,
};

fn map_report(report: Report) -> ReportView {
    ReportView {
        period: report.period.as_str().to_string(),
        user_id: report.user_id,
        summary: map_balance(report.summary),
        recent_transactions: report
            .recent_transactions
            .into_iter()
            .map(|entry| RecentTransaction {
                date: entry.transaction.occurred_at,
                kind: map_kind(entry.transaction.kind),
                amount: entry.transaction.amount.to_major(),
                description: entry.transaction.description,
                category_name: entry.category_name,
            })
            .collect(),
    }
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportView>, ServerError> {
    let period = match query.period.as_deref() {
        Some(raw) => ReportPeriod::try_from(raw)?,
        None => ReportPeriod::default(),
    };
    let report = state.engine.generate_report(user.id, period).await?;
    Ok(Json(map_report(report)))
}

/// Full-history report plus goal progress, for premium users only.
pub async fn premium(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<PremiumReportView>, ServerError> {
    if !user.is_premium {
        return Err(EngineError::Forbidden("premium subscription required".to_string()).into());
    }

    let report = state
        .engine
        .generate_report(user.id, ReportPeriod::All)
        .await?;
    let goals = state
        .engine
        .list_goals(user.id)
        .await?
        .into_iter()
        .map(map_goal)
        .collect();

    Ok(Json(PremiumReportView {
        report: map_report(report),
        goals,
    }))
}
