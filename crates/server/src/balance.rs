use api_types::{balance::BalanceView, transaction::DateRange};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use engine::{Balance, User};

use crate::{ServerError, server::ServerState, transactions::parse_range};

pub(crate) fn map_balance(balance: Balance) -> BalanceView {
    BalanceView {
        total_income: balance.total_income.to_major(),
        total_expense: balance.total_expense.to_major(),
        net_balance: balance.net_balance.to_major(),
    }
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(range): Query<DateRange>,
) -> Result<Json<BalanceView>, ServerError> {
    let (from, to) = parse_range(&range)?;
    let balance = state.engine.calculate_balance(user.id, from, to).await?;
    Ok(Json(map_balance(balance)))
}
