use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::api::extractors::auth::{access_token, decode_access_token};
use crate::domain::models::auth::CurrentUser;
use std::sync::Arc;
use tracing::{debug, Span};

/// Like `AuthUser`, but a missing or invalid token means "anonymous" instead of 401.
pub struct MaybeAuthUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = access_token(parts) else {
            return Ok(MaybeAuthUser(None));
        };

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        match decode_access_token(&token, &app_state.config) {
            Ok(user) => {
                Span::current().record("user_id", &user.id);
                Ok(MaybeAuthUser(Some(user)))
            }
            Err(e) => {
                // Expired or forged tokens browse as guests
                debug!("MaybeAuth: ignoring token: {}", e);
                Ok(MaybeAuthUser(None))
            }
        }
    }
}
