use serde::Deserialize;
use time::Date;

use crate::{dates::iso_date, validation::Validate};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalytics {
    pub user_id: i32,
    #[serde(with = "iso_date")]
    pub period_start: Date,
    #[serde(with = "iso_date")]
    pub period_end: Date,
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
    #[serde(default)]
    pub calorie_trend: f64,
    #[serde(default)]
    pub protein_trend: f64,
    #[serde(default)]
    pub carbs_trend: f64,
    #[serde(default)]
    pub fat_trend: f64,
    pub target_adherence: f64,
    #[serde(default)]
    pub most_consumed_foods: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub user_id: i32,
}

impl Validate for NewAnalytics {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.period_start > self.period_end {
            problems.push("periodStart must not be after periodEnd".into());
        }
        for (field, v) in [
            ("avgCalories", self.avg_calories),
            ("avgProtein", self.avg_protein),
            ("avgCarbs", self.avg_carbs),
            ("avgFat", self.avg_fat),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                problems.push(format!("{field} must be a non-negative number"));
            }
        }
        for (field, v) in [
            ("calorieTrend", self.calorie_trend),
            ("proteinTrend", self.protein_trend),
            ("carbsTrend", self.carbs_trend),
            ("fatTrend", self.fat_trend),
        ] {
            if !v.is_finite() {
                problems.push(format!("{field} must be a number"));
            }
        }
        if !(0.0..=100.0).contains(&self.target_adherence) {
            problems.push("targetAdherence must be between 0 and 100".into());
        }
        problems
    }
}
