use serde::Serialize;
use sqlx::FromRow;
use time::Date;

use crate::dates::iso_date;

/// Running nutrition totals for one user on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub id: i32,
    pub user_id: i32,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub total_calories: i32,
    pub total_protein: i32,
    pub total_carbs: i32,
    pub total_fat: i32,
    pub completed_meals: i32,
    pub water_intake: i32,
}

impl DailySummary {
    pub fn has_negative_totals(&self) -> bool {
        self.total_calories < 0
            || self.total_protein < 0
            || self.total_carbs < 0
            || self.total_fat < 0
            || self.completed_meals < 0
    }
}

/// Insert shape for a summary row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSummaryRow {
    pub user_id: i32,
    pub date: Date,
    pub total_calories: i32,
    pub total_protein: i32,
    pub total_carbs: i32,
    pub total_fat: i32,
    pub completed_meals: i32,
    pub water_intake: i32,
}

/// Field-by-field overwrite. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryChanges {
    pub total_calories: Option<i32>,
    pub total_protein: Option<i32>,
    pub total_carbs: Option<i32>,
    pub total_fat: Option<i32>,
    pub completed_meals: Option<i32>,
    pub water_intake: Option<i32>,
}

impl SummaryChanges {
    pub fn apply_to(&self, summary: &mut DailySummary) {
        if let Some(v) = self.total_calories {
            summary.total_calories = v;
        }
        if let Some(v) = self.total_protein {
            summary.total_protein = v;
        }
        if let Some(v) = self.total_carbs {
            summary.total_carbs = v;
        }
        if let Some(v) = self.total_fat {
            summary.total_fat = v;
        }
        if let Some(v) = self.completed_meals {
            summary.completed_meals = v;
        }
        if let Some(v) = self.water_intake {
            summary.water_intake = v;
        }
    }
}
