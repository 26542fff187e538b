use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

use super::{Balance, Engine, LedgerEntry};

/// How many entries a report lists under `recent_transactions`.
pub const RECENT_TRANSACTIONS_LIMIT: u64 = 10;

/// Calendar window summarized by a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    #[default]
    Monthly,
    Yearly,
    All,
}

impl ReportPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::All => "all",
        }
    }

    /// Inclusive bounds of the window that contains `now`.
    ///
    /// Monthly starts at the first day of the current month, yearly at
    /// January 1st, both at midnight UTC. `All` is unbounded.
    pub fn window(self, now: DateTime<Utc>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let start = match self {
            Self::Monthly => NaiveDate::from_ymd_opt(now.year(), now.month(), 1),
            Self::Yearly => NaiveDate::from_ymd_opt(now.year(), 1, 1),
            Self::All => return (None, None),
        };
        let start = start
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc());
        (start, Some(now))
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ReportPeriod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "all" => Ok(Self::All),
            other => Err(EngineError::InvalidInput(format!(
                "invalid report period: {other}"
            ))),
        }
    }
}

/// Financial report of one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub period: ReportPeriod,
    pub user_id: Uuid,
    pub summary: Balance,
    /// Latest entries regardless of the period.
    pub recent_transactions: Vec<LedgerEntry>,
}

impl Engine {
    /// Summary over `period` plus the most recent transactions.
    pub async fn generate_report(
        &self,
        user_id: Uuid,
        period: ReportPeriod,
    ) -> ResultEngine<Report> {
        let (from, to) = period.window(Utc::now());
        let summary = self.calculate_balance(user_id, from, to).await?;
        let recent_transactions = self
            .list_recent(user_id, RECENT_TRANSACTIONS_LIMIT)
            .await?;

        Ok(Report {
            period,
            user_id,
            summary,
            recent_transactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn monthly_window_starts_on_the_first() {
        let now = Utc.with_ymd_and_hms(2025, 3, 17, 14, 30, 0).unwrap();
        let (from, to) = ReportPeriod::Monthly.window(now);
        assert_eq!(from, Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()));
        assert_eq!(to, Some(now));
    }

    #[test]
    fn yearly_window_starts_on_january_first() {
        let now = Utc.with_ymd_and_hms(2025, 11, 2, 8, 0, 0).unwrap();
        let (from, _) = ReportPeriod::Yearly.window(now);
        assert_eq!(from, Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn all_is_unbounded() {
        assert_eq!(ReportPeriod::All.window(Utc::now()), (None, None));
    }

    #[test]
    fn parses_period_names() {
        assert_eq!(ReportPeriod::try_from("Monthly").unwrap(), ReportPeriod::Monthly);
        assert_eq!(ReportPeriod::try_from(" yearly ").unwrap(), ReportPeriod::Yearly);
        assert_eq!(ReportPeriod::try_from("all").unwrap(), ReportPeriod::All);
        assert!(ReportPeriod::try_from("weekly").unwrap_err().is_validation());
        assert_eq!(ReportPeriod::default(), ReportPeriod::Monthly);
    }
}
