use crate::config::AppConfig;
use crate::meals::repo::{MealRepo, PgMealRepo};
use crate::users::repo::{PgUserRepo, UserRepo};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub meals: Arc<dyn MealRepo>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn postgres(db: PgPool, config: AppConfig) -> Self {
        Self {
            users: Arc::new(PgUserRepo::new(db.clone())),
            meals: Arc::new(PgMealRepo::new(db)),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by in-memory repositories; no database needed.
    pub fn in_memory() -> Self {
        use crate::memory::{InMemoryMealRepo, InMemoryUserRepo};

        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            meals: Arc::new(InMemoryMealRepo::new()),
            config: Arc::new(AppConfig::for_tests()),
        }
    }
}
