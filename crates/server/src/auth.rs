//! Registration, login and bearer-token handling.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use api_types::auth::{Credentials, Registered, Token};
use engine::EngineError;

use crate::{ServerError, server::ServerState};

pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 1;
pub const DEFAULT_ISSUER: &str = "finora";

/// Claims carried by access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl Claims {
    pub fn user_id(&self) -> Option<Uuid> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: u64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    pub fn with_ttl_hours(mut self, hours: u64) -> Self {
        self.ttl_hours = hours;
        self
    }
}

/// Signs and validates HS256 access tokens.
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("ttl_hours", &self.config.ttl_hours)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn issue(&self, user: &engine::User) -> Result<String, ServerError> {
        let now = Utc::now();
        let exp = i64::try_from(self.config.ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| ServerError::Internal("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| ServerError::Internal(format!("failed to sign token: {err}")))
    }

    /// Signature, expiry and issuer are checked.
    pub fn validate(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }

    pub fn expires_in_seconds(&self) -> i64 {
        i64::try_from(self.config.ttl_hours.saturating_mul(3600)).unwrap_or(i64::MAX)
    }
}

/// Resolve the bearer token to a user and expose it as an
/// `Extension<engine::User>`.
pub async fn require_bearer(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ServerError::Unauthorized)?;
    let user_id = state
        .jwt
        .validate(bearer.token())
        .and_then(|claims| claims.user_id())
        .ok_or(ServerError::Unauthorized)?;

    let user = match state.engine.user(user_id).await {
        Ok(user) => user,
        Err(EngineError::KeyNotFound(_)) => return Err(ServerError::Unauthorized),
        Err(err) => return Err(err.into()),
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<Credentials>,
) -> Result<(StatusCode, Json<Registered>), ServerError> {
    let user = state
        .engine
        .register_user(&payload.username, &payload.password)
        .await?;
    tracing::info!("user {} registered", user.id);

    Ok((
        StatusCode::CREATED,
        Json(Registered {
            id: user.id,
            username: user.username,
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<Token>, ServerError> {
    let user = state
        .engine
        .authenticate(&payload.username, &payload.password)
        .await?;

    Ok(Json(Token {
        access_token: state.jwt.issue(&user)?,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expires_in_seconds(),
    }))
}
