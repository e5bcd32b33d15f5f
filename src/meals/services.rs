use tracing::{debug, info};
use uuid::Uuid;

use super::{
    dto::ValidMeal,
    metrics::MealMetrics,
    repo::MealRepo,
    repo_types::{Meal, MealOrder},
};
use crate::error::{AppError, AppResult};

const MEAL_NOT_FOUND: &str = "Meal not found";

pub async fn create_meal(meals: &dyn MealRepo, user_id: Uuid, input: ValidMeal) -> AppResult<Meal> {
    let meal = meals.insert(user_id, Uuid::new_v4(), &input).await?;
    info!(%user_id, meal_id = %meal.id, "meal created");
    Ok(meal)
}

/// Newest first.
pub async fn list_meals(meals: &dyn MealRepo, user_id: Uuid) -> AppResult<Vec<Meal>> {
    Ok(meals.list_by_user(user_id, MealOrder::NewestFirst).await?)
}

pub async fn get_meal(meals: &dyn MealRepo, user_id: Uuid, meal_id: Uuid) -> AppResult<Meal> {
    meals
        .find(user_id, meal_id)
        .await?
        .ok_or(AppError::NotFound(MEAL_NOT_FOUND))
}

pub async fn update_meal(
    meals: &dyn MealRepo,
    user_id: Uuid,
    meal_id: Uuid,
    input: ValidMeal,
) -> AppResult<Meal> {
    let meal = meals
        .update(user_id, meal_id, &input)
        .await?
        .ok_or(AppError::NotFound(MEAL_NOT_FOUND))?;
    info!(%user_id, %meal_id, "meal updated");
    Ok(meal)
}

pub async fn delete_meal(meals: &dyn MealRepo, user_id: Uuid, meal_id: Uuid) -> AppResult<()> {
    if !meals.delete(user_id, meal_id).await? {
        return Err(AppError::NotFound(MEAL_NOT_FOUND));
    }
    info!(%user_id, %meal_id, "meal deleted");
    Ok(())
}

pub async fn meal_metrics(meals: &dyn MealRepo, user_id: Uuid) -> AppResult<MealMetrics> {
    let history = meals.list_by_user(user_id, MealOrder::Chronological).await?;
    let metrics = MealMetrics::from_history(&history);
    debug!(%user_id, ?metrics, "metrics computed");
    Ok(metrics)
}
