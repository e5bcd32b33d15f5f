use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub is_on_diet: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Order in which a user's meals are returned, by `date_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealOrder {
    /// Oldest first; ties in creation order.
    Chronological,
    /// Newest first; ties most recently created first.
    NewestFirst,
}
