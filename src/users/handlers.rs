use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, instrument};

use super::{
    dto::{PublicUser, RegisterRequest, RegisterResponse},
    services::register_user,
};
use crate::{
    auth::session::session_cookie,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, CookieJar, Json<RegisterResponse>)> {
    let Json(body) = payload?;
    let input = body.validate()?;
    let mut user = register_user(state.users.as_ref(), input).await?;

    let Some(token) = user.session_id.take() else {
        error!(user_id = %user.id, "registered user has no session token");
        return Err(AppError::Internal(anyhow::anyhow!("session token missing")));
    };
    let jar = jar.add(session_cookie(token, state.config.cookie_secure));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(RegisterResponse {
            message: "User created successfully",
            user: PublicUser::from(user),
        }),
    ))
}
