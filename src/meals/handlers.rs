use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{
        MealListResponse, MealMessageResponse, MealRequest, MealResponse, MessageResponse,
        MetricsResponse,
    },
    services,
};
use crate::{auth::session::SessionUser, error::AppResult, state::AppState};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/metrics", get(get_metrics))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    payload: Result<Json<MealRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MealMessageResponse>)> {
    let Json(body) = payload?;
    let input = body.validate()?;
    let meal = services::create_meal(state.meals.as_ref(), user.id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MealMessageResponse {
            message: "Meal registered successfully",
            meal,
        }),
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> AppResult<Json<MealListResponse>> {
    let meals = services::list_meals(state.meals.as_ref(), user.id).await?;
    let total = meals.len();
    Ok(Json(MealListResponse { meals, total }))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_metrics(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> AppResult<Json<MetricsResponse>> {
    let metrics = services::meal_metrics(state.meals.as_ref(), user.id).await?;
    Ok(Json(MetricsResponse { metrics }))
}

#[instrument(skip(state, user, id), fields(user_id = %user.id))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<MealResponse>> {
    let Path(meal_id) = id?;
    let meal = services::get_meal(state.meals.as_ref(), user.id, meal_id).await?;
    Ok(Json(MealResponse { meal }))
}

#[instrument(skip(state, user, id, payload), fields(user_id = %user.id))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<MealRequest>, JsonRejection>,
) -> AppResult<Json<MealMessageResponse>> {
    let Path(meal_id) = id?;
    let Json(body) = payload?;
    let input = body.validate()?;
    let meal = services::update_meal(state.meals.as_ref(), user.id, meal_id, input).await?;

    Ok(Json(MealMessageResponse {
        message: "Meal updated successfully",
        meal,
    }))
}

#[instrument(skip(state, user, id), fields(user_id = %user.id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(meal_id) = id?;
    services::delete_meal(state.meals.as_ref(), user.id, meal_id).await?;
    Ok(Json(MessageResponse {
        message: "Meal deleted successfully",
    }))
}
