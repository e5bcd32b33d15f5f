use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{RegisterRequest, ValidUser},
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::error::{AppError, AppResult};

const EMAIL_TAKEN: &str = "Email already in use";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

impl RegisterRequest {
    pub fn validate(self) -> AppResult<ValidUser> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name is required".into()));
        }

        let email = self.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::Validation("email must be a valid address".into()));
        }

        Ok(ValidUser { name, email })
    }
}

/// Creates the user together with its session token.
///
/// The returned `User` carries the token in `session_id`; the caller is
/// responsible for handing it to the client as a cookie.
pub async fn register_user(users: &dyn UserRepo, input: ValidUser) -> AppResult<User> {
    if users.find_by_email(&input.email).await?.is_some() {
        warn!(email = %input.email, "email already registered");
        return Err(AppError::Conflict(EMAIL_TAKEN.into()));
    }

    let new_user = NewUser {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        session_id: Uuid::new_v4().to_string(),
    };

    match users.insert(new_user).await? {
        Some(user) => {
            info!(user_id = %user.id, email = %user.email, "user registered");
            Ok(user)
        }
        None => {
            warn!("email claimed by a concurrent registration");
            Err(AppError::Conflict(EMAIL_TAKEN.into()))
        }
    }
}
