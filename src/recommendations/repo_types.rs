use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Food,
    Meal,
    Nutrient,
    Habit,
}

impl RecommendationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationKind::Food => "food",
            RecommendationKind::Meal => "meal",
            RecommendationKind::Nutrient => "nutrient",
            RecommendationKind::Habit => "habit",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(RecommendationKind::Food),
            "meal" => Ok(RecommendationKind::Meal),
            "nutrient" => Ok(RecommendationKind::Nutrient),
            "habit" => Ok(RecommendationKind::Habit),
            other => anyhow::bail!("unknown recommendation type {other:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i32,
    pub user_id: i32,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub reason: String,
    pub priority: i32, // 1 (low) ..= 5 (urgent)
    pub suggested_foods: Vec<String>,
    pub suggested_meals: Vec<String>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Retrieval order: priority descending, newest first within a priority.
/// Ids break timestamp ties so the order is total.
pub fn sort_for_display(recs: &mut [Recommendation]) {
    recs.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}
