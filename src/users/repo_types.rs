use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record. Nutrition targets drive the progress displays.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2, never exposed in JSON
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub calorie_target: i32,
    pub protein_target: i32,
    pub carbs_target: i32,
    pub fat_target: i32,
    pub diet_type: String,
    pub allergens: Vec<String>,
}

/// Insert shape with defaults already resolved and the password hashed.
#[derive(Debug, Clone)]
pub struct NewUserRow {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub calorie_target: i32,
    pub protein_target: i32,
    pub carbs_target: i32,
    pub fat_target: i32,
    pub diet_type: String,
    pub allergens: Vec<String>,
}
