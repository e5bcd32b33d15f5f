use serde::{Deserialize, Serialize};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};

use super::{metrics::MealMetrics, repo_types::Meal};
use crate::error::{AppError, AppResult};

/// Body of `POST /meals` and `PUT /meals/:id`.
#[derive(Debug, Deserialize)]
pub struct MealRequest {
    pub name: String,
    pub description: String,
    pub date_time: String,
    pub is_on_diet: bool,
}

/// The four user-editable fields of a meal, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMeal {
    pub name: String,
    pub description: String,
    pub date_time: OffsetDateTime,
    pub is_on_diet: bool,
}

fn required(field: &str, value: String) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Parses `date_time`. Values without an offset are taken as UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]` and a bare `YYYY-MM-DD`.
fn parse_date_time(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at);
    }

    let local_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    if let Some(at) = local_formats
        .iter()
        .find_map(|fmt| PrimitiveDateTime::parse(raw, *fmt).ok())
    {
        return Some(at.assume_utc());
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}

impl MealRequest {
    pub fn validate(self) -> AppResult<ValidMeal> {
        let name = required("name", self.name)?;
        let description = required("description", self.description)?;
        let raw_date = required("date_time", self.date_time)?;
        let date_time = parse_date_time(&raw_date).ok_or_else(|| {
            AppError::Validation("date_time must be a date or timestamp".into())
        })?;

        Ok(ValidMeal {
            name,
            description,
            date_time,
            is_on_diet: self.is_on_diet,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MealMessageResponse {
    pub message: &'static str,
    pub meal: Meal,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Meal,
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<Meal>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: MealMetrics,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
