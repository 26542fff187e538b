//! CSV export of the caller's ledger.

use axum::{
    Extension,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use csv::Writer;
use engine::{LedgerEntry, User};
use serde::Serialize;

use crate::{ServerError, server::ServerState};

#[derive(Serialize)]
struct ExportRow {
    id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: String,
    category: String,
    description: Option<String>,
    date: String,
}

impl From<LedgerEntry> for ExportRow {
    fn from(entry: LedgerEntry) -> Self {
        let tx = entry.transaction;
        Self {
            id: tx.id.to_string(),
            kind: tx.kind.as_str(),
            amount: tx.amount.to_string(),
            category: entry.category_name,
            description: tx.description,
            date: tx.occurred_at.to_rfc3339(),
        }
    }
}

fn to_csv(entries: Vec<LedgerEntry>) -> Result<Vec<u8>, ServerError> {
    let mut writer = Writer::from_writer(vec![]);
    for entry in entries {
        writer
            .serialize(ExportRow::from(entry))
            .map_err(|err| ServerError::Internal(format!("failed to serialize export row: {err}")))?;
    }
    writer
        .into_inner()
        .map_err(|err| ServerError::Internal(format!("failed to finalize export: {err}")))
}

/// Every transaction of the caller, newest first.
pub async fn csv(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Response, ServerError> {
    let entries = state.engine.list_transactions(user.id, None, None).await?;
    if entries.is_empty() {
        return Err(ServerError::NotFound(
            "no transactions to export".to_string(),
        ));
    }

    let data = to_csv(entries)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        data,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use engine::{MoneyCents, Transaction, TransactionKind};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let tx = Transaction::new(
            Uuid::new_v4(),
            TransactionKind::Expense,
            MoneyCents::new(12_50),
            Some("coffee, beans".to_string()),
            None,
            Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap(),
        )
        .unwrap();
        let id = tx.id;
        let data = to_csv(vec![LedgerEntry {
            transaction: tx,
            category_name: "Uncategorized".to_string(),
        }])
        .unwrap();

        let text = String::from_utf8(data).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,type,amount,category,description,date"));
        assert_eq!(
            lines.next().unwrap(),
            format!("{id},expense,12.50,Uncategorized,\"coffee, beans\",2026-05-04T09:30:00+00:00")
        );
        assert_eq!(lines.next(), None);
    }
}
