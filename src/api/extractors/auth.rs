use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::auth::{Claims, CurrentUser};
use std::sync::Arc;
use tower_cookies::Cookies;
use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};
use tracing::{debug, Span};

const ACCESS_TOKEN_COOKIE: &str = "access_token";

pub struct AuthUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let access_token = access_token(parts).ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let user = decode_access_token(&access_token, &app_state.config)
            .map_err(|e| {
                debug!("Rejected access token: {}", e);
                StatusCode::UNAUTHORIZED
            })?;

        Span::current().record("user_id", &user.id);

        Ok(AuthUser(user))
    }
}

/// Bearer header wins over the cookie when both are present.
pub(crate) fn access_token(parts: &Parts) -> Option<String> {
    let from_header = parts.headers.get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    from_header.or_else(|| {
        parts.extensions.get::<Cookies>()?
            .get(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    })
}

pub(crate) fn decode_access_token(token: &str, config: &Config) -> Result<CurrentUser, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.jwt_audience.as_str()]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
    Ok(token_data.claims.into())
}
