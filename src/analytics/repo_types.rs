use serde::Serialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

use crate::dates::iso_date;

/// Multi-day rollup produced outside this service; stored and served as-is.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NutritionAnalytics {
    pub id: i32,
    pub user_id: i32,
    #[serde(with = "iso_date")]
    pub period_start: Date,
    #[serde(with = "iso_date")]
    pub period_end: Date,
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
    pub calorie_trend: f64,
    pub protein_trend: f64,
    pub carbs_trend: f64,
    pub fat_trend: f64,
    pub target_adherence: f64,
    pub most_consumed_foods: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
