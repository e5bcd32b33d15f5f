//! In-memory repositories for tests.

use async_trait::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::meals::{
    dto::ValidMeal,
    repo::MealRepo,
    repo_types::{Meal, MealOrder},
};
use crate::users::{
    repo::UserRepo,
    repo_types::{NewUser, User},
};

#[derive(Clone, Default)]
pub struct InMemoryUserRepo {
    storage: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let storage = self.storage.read().await;
        Ok(storage.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>> {
        let storage = self.storage.read().await;
        Ok(storage
            .iter()
            .find(|u| u.session_id.as_deref() == Some(session_id))
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        let mut storage = self.storage.write().await;
        if storage.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let user = User {
            id: user.id,
            name: user.name,
            email: user.email,
            session_id: Some(user.session_id),
            created_at: OffsetDateTime::now_utc(),
        };
        storage.push(user.clone());
        Ok(Some(user))
    }
}

/// Meals kept in insertion order, so equal timestamps sort by creation.
#[derive(Clone, Default)]
pub struct InMemoryMealRepo {
    storage: Arc<RwLock<Vec<Meal>>>,
}

impl InMemoryMealRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealRepo for InMemoryMealRepo {
    async fn insert(&self, user_id: Uuid, meal_id: Uuid, meal: &ValidMeal) -> anyhow::Result<Meal> {
        let row = Meal {
            id: meal_id,
            user_id,
            name: meal.name.clone(),
            description: meal.description.clone(),
            date_time: meal.date_time,
            is_on_diet: meal.is_on_diet,
            created_at: OffsetDateTime::now_utc(),
        };
        self.storage.write().await.push(row.clone());
        Ok(row)
    }

    async fn list_by_user(&self, user_id: Uuid, order: MealOrder) -> anyhow::Result<Vec<Meal>> {
        let storage = self.storage.read().await;
        let mut rows: Vec<Meal> = storage
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.date_time);
        if order == MealOrder::NewestFirst {
            rows.reverse();
        }
        Ok(rows)
    }

    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let storage = self.storage.read().await;
        Ok(storage
            .iter()
            .find(|m| m.id == meal_id && m.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        meal: &ValidMeal,
    ) -> anyhow::Result<Option<Meal>> {
        let mut storage = self.storage.write().await;
        let Some(row) = storage
            .iter_mut()
            .find(|m| m.id == meal_id && m.user_id == user_id)
        else {
            return Ok(None);
        };
        row.name = meal.name.clone();
        row.description = meal.description.clone();
        row.date_time = meal.date_time;
        row.is_on_diet = meal.is_on_diet;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut storage = self.storage.write().await;
        let before = storage.len();
        storage.retain(|m| !(m.id == meal_id && m.user_id == user_id));
        Ok(storage.len() < before)
    }
}
