use serde::Deserialize;

use crate::validation::{require_non_negative, require_text, Validate};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFood {
    pub name: String,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub serving_size: String,
    pub food_group: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// `GET /api/foods` filters. `q` takes precedence over `group`.
#[derive(Debug, Default, Deserialize)]
pub struct FoodQuery {
    pub q: Option<String>,
    pub group: Option<String>,
}

/// The three mutually exclusive catalog query modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodFilter {
    Search(String),
    Group(String),
    All,
}

impl From<FoodQuery> for FoodFilter {
    fn from(q: FoodQuery) -> Self {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        match (non_blank(q.q), non_blank(q.group)) {
            (Some(needle), _) => FoodFilter::Search(needle),
            (None, Some(group)) => FoodFilter::Group(group),
            (None, None) => FoodFilter::All,
        }
    }
}

impl Validate for NewFood {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, "name", &self.name);
        require_text(&mut problems, "servingSize", &self.serving_size);
        require_text(&mut problems, "foodGroup", &self.food_group);
        require_non_negative(&mut problems, "calories", self.calories);
        require_non_negative(&mut problems, "protein", self.protein);
        require_non_negative(&mut problems, "carbs", self.carbs);
        require_non_negative(&mut problems, "fat", self.fat);
        problems
    }
}
