//! Persistence capability. Handlers and services only ever see `Arc<dyn Store>`;
//! the backing implementation is picked at startup.

#[cfg(test)]
mod faulty;
mod memory;
mod pg;

#[cfg(test)]
pub use faulty::FaultyStore;
pub use memory::MemStore;
pub use pg::PgStore;

use async_trait::async_trait;
use time::Date;

use crate::{
    analytics::{dto::NewAnalytics, repo_types::NutritionAnalytics},
    foods::{dto::NewFood, repo_types::Food},
    meal_plans::{
        dto::{MealPlanPatch, NewMealPlan},
        repo_types::MealPlan,
    },
    meals::{
        dto::{MealPatch, NewMeal},
        repo_types::Meal,
    },
    recommendations::{
        dto::{NewRecommendation, RecommendationPatch},
        repo_types::Recommendation,
    },
    summaries::repo_types::{DailySummary, NewSummaryRow, SummaryChanges},
    users::{
        dto::UserPatch,
        repo_types::{NewUserRow, User},
    },
};

/// Returned by [`Store::create_user`] when the username is already taken.
#[derive(Debug, thiserror::Error)]
#[error("username {0:?} is already taken")]
pub struct DuplicateUsername(pub String);

#[async_trait]
pub trait Store: Send + Sync {
    // users
    async fn get_user(&self, id: i32) -> anyhow::Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    /// Fails with [`DuplicateUsername`] if the username exists.
    async fn create_user(&self, row: &NewUserRow) -> anyhow::Result<User>;
    async fn update_user(&self, id: i32, patch: &UserPatch) -> anyhow::Result<Option<User>>;

    // foods
    async fn get_food(&self, id: i32) -> anyhow::Result<Option<Food>>;
    async fn list_foods(&self) -> anyhow::Result<Vec<Food>>;
    async fn foods_by_group(&self, group: &str) -> anyhow::Result<Vec<Food>>;
    /// Case-insensitive substring search over name, description and group.
    async fn search_foods(&self, needle: &str) -> anyhow::Result<Vec<Food>>;
    async fn create_food(&self, food: &NewFood) -> anyhow::Result<Food>;
    async fn count_foods(&self) -> anyhow::Result<i64>;

    // meals
    async fn get_meal(&self, id: i32) -> anyhow::Result<Option<Meal>>;
    async fn meals_by_user(&self, user_id: i32, date: Option<Date>) -> anyhow::Result<Vec<Meal>>;
    async fn create_meal(&self, meal: &NewMeal) -> anyhow::Result<Meal>;
    async fn update_meal(&self, id: i32, patch: &MealPatch) -> anyhow::Result<Option<Meal>>;
    async fn delete_meal(&self, id: i32) -> anyhow::Result<bool>;

    // daily summaries
    async fn get_summary(&self, user_id: i32, date: Date) -> anyhow::Result<Option<DailySummary>>;
    async fn create_summary(&self, row: &NewSummaryRow) -> anyhow::Result<DailySummary>;
    async fn update_summary(
        &self,
        id: i32,
        changes: &SummaryChanges,
    ) -> anyhow::Result<Option<DailySummary>>;

    // meal plans
    async fn get_meal_plan(&self, id: i32) -> anyhow::Result<Option<MealPlan>>;
    async fn active_meal_plan(&self, user_id: i32) -> anyhow::Result<Option<MealPlan>>;
    async fn meal_plans_by_user(&self, user_id: i32) -> anyhow::Result<Vec<MealPlan>>;
    async fn create_meal_plan(&self, plan: &NewMealPlan) -> anyhow::Result<MealPlan>;
    async fn update_meal_plan(
        &self,
        id: i32,
        patch: &MealPlanPatch,
    ) -> anyhow::Result<Option<MealPlan>>;
    async fn delete_meal_plan(&self, id: i32) -> anyhow::Result<bool>;

    // nutrition analytics
    async fn get_analytics(&self, id: i32) -> anyhow::Result<Option<NutritionAnalytics>>;
    /// Newest period first.
    async fn analytics_by_user(&self, user_id: i32) -> anyhow::Result<Vec<NutritionAnalytics>>;
    async fn create_analytics(&self, rollup: &NewAnalytics) -> anyhow::Result<NutritionAnalytics>;

    // recommendations
    /// Priority descending, then newest first.
    async fn recommendations_by_user(
        &self,
        user_id: i32,
        active_only: bool,
    ) -> anyhow::Result<Vec<Recommendation>>;
    async fn create_recommendation(
        &self,
        rec: &NewRecommendation,
    ) -> anyhow::Result<Recommendation>;
    async fn update_recommendation(
        &self,
        id: i32,
        patch: &RecommendationPatch,
    ) -> anyhow::Result<Option<Recommendation>>;
    async fn delete_recommendation(&self, id: i32) -> anyhow::Result<bool>;

    /// Releases backing resources. The store must not be used afterwards.
    async fn close(&self) {}
}
