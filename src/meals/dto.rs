use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::{Meal, MealFoodItem, MealType};
use crate::{
    dates::iso_date,
    summaries::repo_types::DailySummary,
    validation::{is_valid_clock_time, require_non_negative, require_text, Validate},
};

/// Request body for `POST /api/meals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    pub user_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub time: String,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub foods: Vec<MealFoodItem>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

/// Request body for `PATCH /api/meals/:id`. The owner cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub meal_type: Option<MealType>,
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    pub time: Option<String>,
    pub calories: Option<i32>,
    pub protein: Option<i32>,
    pub carbs: Option<i32>,
    pub fat: Option<i32>,
    pub foods: Option<Vec<MealFoodItem>>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl MealPatch {
    /// True when applying the patch can change the meal's summary contribution.
    pub fn touches_summary(&self) -> bool {
        self.date.is_some()
            || self.calories.is_some()
            || self.protein.is_some()
            || self.carbs.is_some()
            || self.fat.is_some()
    }

    pub fn apply_to(&self, meal: &mut Meal) {
        if let Some(v) = &self.name {
            meal.name = v.clone();
        }
        if let Some(v) = self.meal_type {
            meal.meal_type = v;
        }
        if let Some(v) = self.date {
            meal.date = v;
        }
        if let Some(v) = &self.time {
            meal.time = v.clone();
        }
        if let Some(v) = self.calories {
            meal.calories = v;
        }
        if let Some(v) = self.protein {
            meal.protein = v;
        }
        if let Some(v) = self.carbs {
            meal.carbs = v;
        }
        if let Some(v) = self.fat {
            meal.fat = v;
        }
        if let Some(v) = &self.foods {
            meal.foods = v.clone();
        }
        if let Some(v) = &self.image_url {
            meal.image_url = Some(v.clone());
        }
        if let Some(v) = &self.description {
            meal.description = Some(v.clone());
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealListQuery {
    pub user_id: i32,
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
}

/// `POST /api/meals` echoes both records so clients can refresh their caches.
#[derive(Debug, Serialize)]
pub struct CreatedMealResponse {
    pub meal: Meal,
    pub summary: DailySummary,
}

fn check_food_items(problems: &mut Vec<String>, foods: &[MealFoodItem]) {
    for (i, item) in foods.iter().enumerate() {
        if !(item.quantity.is_finite() && item.quantity > 0.0) {
            problems.push(format!("foods[{i}].quantity must be positive"));
        }
        if item.unit.trim().is_empty() {
            problems.push(format!("foods[{i}].unit is required"));
        }
    }
}

impl Validate for NewMeal {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, "name", &self.name);
        if !is_valid_clock_time(&self.time) {
            problems.push("time must be HH:MM".into());
        }
        require_non_negative(&mut problems, "calories", self.calories);
        require_non_negative(&mut problems, "protein", self.protein);
        require_non_negative(&mut problems, "carbs", self.carbs);
        require_non_negative(&mut problems, "fat", self.fat);
        check_food_items(&mut problems, &self.foods);
        problems
    }
}

impl Validate for MealPatch {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(name) = &self.name {
            require_text(&mut problems, "name", name);
        }
        if let Some(time) = &self.time {
            if !is_valid_clock_time(time) {
                problems.push("time must be HH:MM".into());
            }
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if let Some(v) = value {
                require_non_negative(&mut problems, field, v);
            }
        }
        if let Some(foods) = &self.foods {
            check_food_items(&mut problems, foods);
        }
        problems
    }
}
