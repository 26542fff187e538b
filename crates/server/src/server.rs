use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use std::sync::Arc;

use crate::{JwtManager, auth, balance, categories, export, goals, reports, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub jwt: Arc<JwtManager>,
}

impl ServerState {
    pub fn new(engine: Engine, jwt: JwtManager) -> Self {
        Self {
            engine: Arc::new(engine),
            jwt: Arc::new(jwt),
        }
    }
}

/// Every route except `/register` and `/login` requires a bearer token.
pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            patch(transactions::update).delete(transactions::delete),
        )
        .route("/balance", get(balance::get))
        .route("/goals", get(goals::list).post(goals::create))
        .route("/goals/{id}/contribute", post(goals::contribute))
        .route("/reports", get(reports::get))
        .route("/reports/premium", get(reports::premium))
        .route("/export/csv", get(export::csv))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(protected)
        .with_state(state)
}

pub async fn run(state: ServerState, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(state, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
