use serde::Serialize;
use sqlx::FromRow;

/// Catalog entry. Macros are per serving.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: i32,
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

impl Food {
    /// Case-insensitive substring match on name, description or group.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || self.food_group.to_lowercase().contains(needle)
    }
}
