use serde::Deserialize;
use time::Date;

use super::repo_types::MealPlan;
use crate::{
    dates::iso_date,
    validation::{require_text, Validate},
};

fn default_active() -> bool {
    true
}

/// Request body for `POST /api/meal-plans`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealPlan {
    pub user_id: i32,
    pub name: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub meals: serde_json::Value,
}

/// Request body for `PATCH /api/meal-plans/:id`. The owner cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanPatch {
    pub name: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub start_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub end_date: Option<Date>,
    pub is_active: Option<bool>,
    pub meals: Option<serde_json::Value>,
}

impl MealPlanPatch {
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Default::default()
        }
    }

    pub fn activates(&self) -> bool {
        self.is_active == Some(true)
    }

    pub fn apply_to(&self, plan: &mut MealPlan) {
        if let Some(v) = &self.name {
            plan.name = v.clone();
        }
        if let Some(v) = self.start_date {
            plan.start_date = v;
        }
        if let Some(v) = self.end_date {
            plan.end_date = v;
        }
        if let Some(v) = self.is_active {
            plan.is_active = v;
        }
        if let Some(v) = &self.meals {
            plan.meals = v.clone();
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanQuery {
    pub user_id: i32,
    #[serde(default)]
    pub active: bool,
}

impl Validate for NewMealPlan {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, "name", &self.name);
        if self.start_date > self.end_date {
            problems.push("startDate must not be after endDate".into());
        }
        problems
    }
}

impl Validate for MealPlanPatch {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(name) = &self.name {
            require_text(&mut problems, "name", name);
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                problems.push("startDate must not be after endDate".into());
            }
        }
        problems
    }
}
