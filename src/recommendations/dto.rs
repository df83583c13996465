use serde::Deserialize;

use super::repo_types::RecommendationKind;
use crate::validation::{require_text, Validate};

pub const MIN_PRIORITY: i32 = 1;
pub const MAX_PRIORITY: i32 = 5;

fn default_active() -> bool {
    true
}

fn default_priority() -> i32 {
    3
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecommendation {
    pub user_id: i32,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub reason: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub suggested_foods: Vec<String>,
    #[serde(default)]
    pub suggested_meals: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPatch {
    pub is_active: Option<bool>,
    pub priority: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQuery {
    pub user_id: i32,
    #[serde(default)]
    pub active: bool,
}

fn check_priority(problems: &mut Vec<String>, priority: i32) {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        problems.push(format!("priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}"));
    }
}

impl Validate for NewRecommendation {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        require_text(&mut problems, "title", &self.title);
        check_priority(&mut problems, self.priority);
        problems
    }
}

impl Validate for RecommendationPatch {
    fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(p) = self.priority {
            check_priority(&mut problems, p);
        }
        problems
    }
}
