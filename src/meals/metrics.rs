//! Diet adherence statistics over a user's meal history.

use serde::Serialize;

use super::repo_types::Meal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    pub total_meals: u64,
    pub meals_on_diet: u64,
    pub meals_off_diet: u64,
    /// Longest run of consecutive on-diet meals.
    pub best_diet_sequence: u64,
}

impl MealMetrics {
    /// Single pass over on-diet flags, oldest first.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut total = 0u64;
        let mut on_diet = 0u64;
        let mut current = 0u64;
        let mut best = 0u64;

        for flag in flags {
            total += 1;
            if flag {
                on_diet += 1;
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }

        Self {
            total_meals: total,
            meals_on_diet: on_diet,
            meals_off_diet: total - on_diet,
            best_diet_sequence: best,
        }
    }

    /// `meals` must be in ascending `date_time` order.
    pub fn from_history(meals: &[Meal]) -> Self {
        Self::from_flags(meals.iter().map(|m| m.is_on_diet))
    }
}
