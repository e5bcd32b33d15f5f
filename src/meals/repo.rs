use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    dto::ValidMeal,
    repo_types::{Meal, MealOrder},
};

/// Meal storage. Every lookup is scoped to the owning user.
#[async_trait]
pub trait MealRepo: Send + Sync {
    async fn insert(&self, user_id: Uuid, meal_id: Uuid, meal: &ValidMeal) -> anyhow::Result<Meal>;

    async fn list_by_user(&self, user_id: Uuid, order: MealOrder) -> anyhow::Result<Vec<Meal>>;

    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>>;

    /// Overwrites the editable fields. `None` if the meal is absent or not owned.
    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        meal: &ValidMeal,
    ) -> anyhow::Result<Option<Meal>>;

    /// Returns whether a row was removed.
    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgMealRepo {
    db: PgPool,
}

impl PgMealRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealRepo for PgMealRepo {
    async fn insert(&self, user_id: Uuid, meal_id: Uuid, meal: &ValidMeal) -> anyhow::Result<Meal> {
        let row = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, user_id, name, description, date_time, is_on_diet)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, description, date_time, is_on_diet, created_at
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.date_time)
        .bind(meal.is_on_diet)
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;
        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid, order: MealOrder) -> anyhow::Result<Vec<Meal>> {
        let sql = match order {
            MealOrder::Chronological => {
                r#"
                SELECT id, user_id, name, description, date_time, is_on_diet, created_at
                FROM meals
                WHERE user_id = $1
                ORDER BY date_time ASC, created_at ASC
                "#
            }
            MealOrder::NewestFirst => {
                r#"
                SELECT id, user_id, name, description, date_time, is_on_diet, created_at
                FROM meals
                WHERE user_id = $1
                ORDER BY date_time DESC, created_at DESC
                "#
            }
        };

        let rows = sqlx::query_as::<_, Meal>(sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .context("list meals by user")?;
        Ok(rows)
    }

    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date_time, is_on_diet, created_at
            FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("find meal")?;
        Ok(row)
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        meal: &ValidMeal,
    ) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals
               SET name = $3, description = $4, date_time = $5, is_on_diet = $6
             WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, description, date_time, is_on_diet, created_at
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.date_time)
        .bind(meal.is_on_diet)
        .fetch_optional(&self.db)
        .await
        .context("update meal")?;
        Ok(row)
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM meals
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .context("delete meal")?;
        Ok(result.rows_affected() > 0)
    }
}
