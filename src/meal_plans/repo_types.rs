use serde::Serialize;
use sqlx::FromRow;
use time::Date;

use crate::dates::iso_date;

/// A named, date-ranged plan. At most one plan per user is active.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub is_active: bool,
    pub meals: serde_json::Value, // opaque plan content
}
