use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use time::Date;

use super::{MemStore, Store};
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

/// `MemStore` whose meal and summary writes can be switched to fail.
#[derive(Default)]
pub struct FaultyStore {
    inner: MemStore,
    pub fail_summary_writes: AtomicBool,
    pub fail_meal_update: AtomicBool,
    pub fail_meal_delete: AtomicBool,
}

fn check(flag: &AtomicBool, op: &str) -> anyhow::Result<()> {
    if flag.load(Ordering::SeqCst) {
        anyhow::bail!("injected failure in {op}");
    }
    Ok(())
}

#[async_trait]
impl Store for FaultyStore {
    async fn get_user(&self, id: i32) -> anyhow::Result<Option<User>> {
        self.inner.get_user(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        self.inner.get_user_by_username(username).await
    }

    async fn create_user(&self, row: &NewUserRow) -> anyhow::Result<User> {
        self.inner.create_user(row).await
    }

    async fn update_user(&self, id: i32, patch: &UserPatch) -> anyhow::Result<Option<User>> {
        self.inner.update_user(id, patch).await
    }

    async fn get_food(&self, id: i32) -> anyhow::Result<Option<Food>> {
        self.inner.get_food(id).await
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        self.inner.list_foods().await
    }

    async fn foods_by_group(&self, group: &str) -> anyhow::Result<Vec<Food>> {
        self.inner.foods_by_group(group).await
    }

    async fn search_foods(&self, needle: &str) -> anyhow::Result<Vec<Food>> {
        self.inner.search_foods(needle).await
    }

    async fn create_food(&self, food: &NewFood) -> anyhow::Result<Food> {
        self.inner.create_food(food).await
    }

    async fn count_foods(&self) -> anyhow::Result<i64> {
        self.inner.count_foods().await
    }

    async fn get_meal(&self, id: i32) -> anyhow::Result<Option<Meal>> {
        self.inner.get_meal(id).await
    }

    async fn meals_by_user(&self, user_id: i32, date: Option<Date>) -> anyhow::Result<Vec<Meal>> {
        self.inner.meals_by_user(user_id, date).await
    }

    async fn create_meal(&self, meal: &NewMeal) -> anyhow::Result<Meal> {
        self.inner.create_meal(meal).await
    }

    async fn update_meal(&self, id: i32, patch: &MealPatch) -> anyhow::Result<Option<Meal>> {
        check(&self.fail_meal_update, "update_meal")?;
        self.inner.update_meal(id, patch).await
    }

    async fn delete_meal(&self, id: i32) -> anyhow::Result<bool> {
        check(&self.fail_meal_delete, "delete_meal")?;
        self.inner.delete_meal(id).await
    }

    async fn get_summary(&self, user_id: i32, date: Date) -> anyhow::Result<Option<DailySummary>> {
        self.inner.get_summary(user_id, date).await
    }

    async fn create_summary(&self, row: &NewSummaryRow) -> anyhow::Result<DailySummary> {
        check(&self.fail_summary_writes, "create_summary")?;
        self.inner.create_summary(row).await
    }

    async fn update_summary(
        &self,
        id: i32,
        changes: &SummaryChanges,
    ) -> anyhow::Result<Option<DailySummary>> {
        check(&self.fail_summary_writes, "update_summary")?;
        self.inner.update_summary(id, changes).await
    }

    async fn get_meal_plan(&self, id: i32) -> anyhow::Result<Option<MealPlan>> {
        self.inner.get_meal_plan(id).await
    }

    async fn active_meal_plan(&self, user_id: i32) -> anyhow::Result<Option<MealPlan>> {
        self.inner.active_meal_plan(user_id).await
    }

    async fn meal_plans_by_user(&self, user_id: i32) -> anyhow::Result<Vec<MealPlan>> {
        self.inner.meal_plans_by_user(user_id).await
    }

    async fn create_meal_plan(&self, plan: &NewMealPlan) -> anyhow::Result<MealPlan> {
        self.inner.create_meal_plan(plan).await
    }

    async fn update_meal_plan(
        &self,
        id: i32,
        patch: &MealPlanPatch,
    ) -> anyhow::Result<Option<MealPlan>> {
        self.inner.update_meal_plan(id, patch).await
    }

    async fn delete_meal_plan(&self, id: i32) -> anyhow::Result<bool> {
        self.inner.delete_meal_plan(id).await
    }

    async fn get_analytics(&self, id: i32) -> anyhow::Result<Option<NutritionAnalytics>> {
        self.inner.get_analytics(id).await
    }

    async fn analytics_by_user(&self, user_id: i32) -> anyhow::Result<Vec<NutritionAnalytics>> {
        self.inner.analytics_by_user(user_id).await
    }

    async fn create_analytics(&self, rollup: &NewAnalytics) -> anyhow::Result<NutritionAnalytics> {
        self.inner.create_analytics(rollup).await
    }

    async fn recommendations_by_user(
        &self,
        user_id: i32,
        active_only: bool,
    ) -> anyhow::Result<Vec<Recommendation>> {
        self.inner.recommendations_by_user(user_id, active_only).await
    }

    async fn create_recommendation(
        &self,
        rec: &NewRecommendation,
    ) -> anyhow::Result<Recommendation> {
        self.inner.create_recommendation(rec).await
    }

    async fn update_recommendation(
        &self,
        id: i32,
        patch: &RecommendationPatch,
    ) -> anyhow::Result<Option<Recommendation>> {
        self.inner.update_recommendation(id, patch).await
    }

    async fn delete_recommendation(&self, id: i32) -> anyhow::Result<bool> {
        self.inner.delete_recommendation(id).await
    }
}
