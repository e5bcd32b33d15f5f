use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use thiserror::Error;
use time::Duration;
use tracing::{debug, warn};

use crate::{
    error::AppError,
    state::AppState,
    users::{repo::UserRepo, repo_types::User},
};

pub const SESSION_COOKIE: &str = "sessionId";
/// Client-side lifetime only; tokens are never expired server-side.
pub const SESSION_MAX_AGE_DAYS: i64 = 7;

const NO_SESSION: &str = "Unauthorized. Register first.";
const BAD_SESSION: &str = "Invalid session. Register again.";

/// Why a request failed to authenticate.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{}", NO_SESSION)]
    Missing,
    #[error("{}", BAD_SESSION)]
    Invalid,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Missing => AppError::Unauthorized(NO_SESSION),
            SessionError::Invalid => AppError::Unauthorized(BAD_SESSION),
            SessionError::Store(e) => AppError::Internal(e),
        }
    }
}

/// Resolves a presented session token to its user.
///
/// An empty token counts as no token at all.
pub async fn authenticate(
    users: &dyn UserRepo,
    token: Option<&str>,
) -> Result<User, SessionError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(SessionError::Missing)?;

    users
        .find_by_session(token)
        .await?
        .ok_or(SessionError::Invalid)
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// The user resolved from the `sessionId` cookie.
///
/// Put it first in a handler's arguments so unauthenticated requests are
/// rejected before the body or path is looked at.
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE).map(|c| c.value());

        match authenticate(state.users.as_ref(), token).await {
            Ok(user) => {
                debug!(user_id = %user.id, "session resolved");
                Ok(SessionUser(user))
            }
            Err(e) => {
                if !matches!(e, SessionError::Store(_)) {
                    warn!(reason = %e, "session rejected");
                }
                Err(e.into())
            }
        }
    }
}
