use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use auth::{Claims, JwtConfig, JwtManager};
pub use server::{ServerState, router, run, run_with_listener};

mod auth;
mod balance;
mod categories;
mod export;
mod goals;
mod reports;
mod server;
mod transactions;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{Credentials, Registered, Token};
    }

    pub mod category {
        pub use api_types::category::{
            CategoryCreate, CategoryListResponse, CategoryQuery, CategoryView,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{
            DateRange, TransactionCreated, TransactionListResponse, TransactionNew,
            TransactionUpdate, TransactionView,
        };
    }

    pub mod goal {
        pub use api_types::goal::{
            Contribute, ContributionResult, GoalCreated, GoalListResponse, GoalNew, GoalProgress,
        };
    }

    pub mod report {
        pub use api_types::balance::BalanceView;
        pub use api_types::report::{PremiumReportView, RecentTransaction, ReportQuery, ReportView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Missing, malformed or expired bearer token, or a token for an unknown
    /// user.
    Unauthorized,
    NotFound(String),
    Internal(String),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

const INTERNAL_ERROR: &str = "internal server error";

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidAmount(_) | EngineError::InvalidDate(_) | EngineError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) | EngineError::PasswordHash(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            INTERNAL_ERROR.to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            INTERNAL_ERROR.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Internal(err) => {
                tracing::error!("{err}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
