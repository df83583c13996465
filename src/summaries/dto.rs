use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::{DailySummary, SummaryChanges};
use crate::{
    dates::iso_date,
    validation::{require_non_negative, Validate},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub user_id: i32,
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// Request body for `POST /api/daily-summaries`: overwrite (not add) the
/// given totals, creating the row when the day has none.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryUpsert {
    pub user_id: i32,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(flatten)]
    pub fields: SummaryFields,
}

/// Request body for `PATCH /api/daily-summaries/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFields {
    pub total_calories: Option<i32>,
    pub total_protein: Option<i32>,
    pub total_carbs: Option<i32>,
    pub total_fat: Option<i32>,
    pub completed_meals: Option<i32>,
    pub water_intake: Option<i32>,
}

impl From<&SummaryFields> for SummaryChanges {
    fn from(f: &SummaryFields) -> Self {
        Self {
            total_calories: f.total_calories,
            total_protein: f.total_protein,
            total_carbs: f.total_carbs,
            total_fat: f.total_fat,
            completed_meals: f.completed_meals,
            water_intake: f.water_intake,
        }
    }
}

impl Validate for SummaryFields {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(v) = self.completed_meals {
            require_non_negative(&mut problems, "completedMeals", v);
        }
        if let Some(v) = self.water_intake {
            require_non_negative(&mut problems, "waterIntake", v);
        }
        problems
    }
}

impl Validate for SummaryUpsert {
    fn problems(&self) -> Vec<String> {
        self.fields.problems()
    }
}

/// Summary as served to readers. `id` is absent for a day with no stored row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
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

impl SummaryView {
    pub fn empty(user_id: i32, date: Date) -> Self {
        Self {
            id: None,
            user_id,
            date,
            total_calories: 0,
            total_protein: 0,
            total_carbs: 0,
            total_fat: 0,
            completed_meals: 0,
            water_intake: 0,
        }
    }
}

impl From<DailySummary> for SummaryView {
    fn from(s: DailySummary) -> Self {
        Self {
            id: Some(s.id),
            user_id: s.user_id,
            date: s.date,
            total_calories: s.total_calories,
            total_protein: s.total_protein,
            total_carbs: s.total_carbs,
            total_fat: s.total_fat,
            completed_meals: s.completed_meals,
            water_intake: s.water_intake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_body_keeps_absent_fields_unset() {
        let body: SummaryUpsert =
            serde_json::from_str(r#"{"userId":3,"date":"2024-02-01","waterIntake":6}"#).unwrap();
        assert_eq!(body.fields.water_intake, Some(6));
        assert_eq!(body.fields.total_calories, None);
    }

    #[test]
    fn empty_view_has_no_id_on_the_wire() {
        let view = SummaryView::empty(4, time::macros::date!(2024 - 03 - 10));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["totalCalories"], 0);
        assert_eq!(json["date"], "2024-03-10");
    }
}
