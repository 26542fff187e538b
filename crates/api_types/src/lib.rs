//! Request and response bodies of the HTTP API.
//!
//! Money travels in two forms: requests carry integer minor units
//! (`amount_minor`, cents) so clients never round, responses carry major
//! units as numbers rounded to two decimals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a transaction or category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Registered {
        pub id: Uuid,
        pub username: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub access_token: String,
        /// Always `"Bearer"`.
        pub token_type: String,
        /// Lifetime in seconds.
        pub expires_in: i64,
    }
}

pub mod category {
    use super::*;

    /// `GET /categories` query string. `type` is matched loosely: unknown
    /// values disable the filter.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryQuery {
        #[serde(rename = "type")]
        pub kind: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
        /// `income` or `expense`; validated by the server.
        #[serde(rename = "type")]
        pub kind: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub is_custom: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount_minor: i64,
        /// `income`/`expense` (also `ingreso`/`gasto`); validated by the server.
        #[serde(rename = "type")]
        pub kind: String,
        pub description: Option<String>,
        pub category_id: Option<Uuid>,
        /// ISO-8601; defaults to now.
        pub date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub amount_minor: i64,
        pub description: Option<String>,
        pub category_id: Option<Uuid>,
    }

    /// Optional inclusive ISO-8601 bounds shared by `/transactions` and
    /// `/balance`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DateRange {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: f64,
        pub description: Option<String>,
        pub category_id: Option<Uuid>,
        pub category_name: String,
        pub date: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub total_income: f64,
        pub total_expense: f64,
        pub net_balance: f64,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        pub target_minor: i64,
        /// ISO-8601; must be in the future.
        pub due_date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Contribute {
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ContributionResult {
        pub goal: GoalProgress,
        /// `true` only for the contribution that reached the target.
        pub just_completed: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalProgress {
        pub id: Uuid,
        pub name: String,
        pub target_amount: f64,
        pub current_amount: f64,
        pub progress_percent: f64,
        pub due_date: Option<DateTime<Utc>>,
        pub is_completed: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalListResponse {
        pub goals: Vec<GoalProgress>,
    }
}

pub mod report {
    use super::*;

    use crate::{balance::BalanceView, goal::GoalProgress};

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ReportQuery {
        /// `monthly` (default), `yearly` or `all`.
        pub period: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecentTransaction {
        pub date: DateTime<Utc>,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: f64,
        pub description: Option<String>,
        pub category_name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReportView {
        pub period: String,
        pub user_id: Uuid,
        pub summary: BalanceView,
        pub recent_transactions: Vec<RecentTransaction>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PremiumReportView {
        pub report: ReportView,
        pub goals: Vec<GoalProgress>,
    }
}
