use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AppError;

/// Semantic checks on a payload that already deserialized into its typed shape.
/// Services run this before touching the store.
pub trait Validate {
    fn problems(&self) -> Vec<String>;

    fn validate(&self) -> Result<(), AppError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            warn!(?problems, "payload rejected");
            Err(AppError::Validation(problems))
        }
    }
}

/// `Json<T>` whose rejection (malformed body, missing field, wrong type) is a validation error.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let text = rejection.body_text();
                warn!(error = %text, "json body rejected");
                Err(AppError::Validation(vec![text]))
            }
        }
    }
}

/// `Query<T>` counterpart of [`ValidJson`].
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                let text = rejection.body_text();
                warn!(error = %text, "query string rejected");
                Err(AppError::Validation(vec![text]))
            }
        }
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// 24h clock, `HH:MM`.
pub(crate) fn is_valid_clock_time(time: &str) -> bool {
    lazy_static! {
        static ref CLOCK_RE: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
    }
    CLOCK_RE.is_match(time)
}

/// Pushes `"<field> is required"` when `value` is blank.
pub(crate) fn require_text(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{field} is required"));
    }
}

pub(crate) fn require_non_negative(problems: &mut Vec<String>, field: &str, value: i32) {
    if value < 0 {
        problems.push(format!("{field} must not be negative"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example.com"));
    }

    #[test]
    fn clock_times() {
        for ok in ["00:00", "07:30", "19:05", "23:59"] {
            assert!(is_valid_clock_time(ok), "{ok}");
        }
        for bad in ["24:00", "7:30", "12:60", "noon", "12:30:00"] {
            assert!(!is_valid_clock_time(bad), "{bad}");
        }
    }

    #[test]
    fn required_helpers_collect_messages() {
        let mut problems = Vec::new();
        require_text(&mut problems, "name", "   ");
        require_non_negative(&mut problems, "calories", -1);
        require_non_negative(&mut problems, "fat", 0);
        assert_eq!(
            problems,
            vec!["name is required".to_string(), "calories must not be negative".to_string()]
        );
    }
}
