use std::collections::BTreeMap;

use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use tokio::sync::RwLock;

use super::{DuplicateUsername, Store};
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
        repo_types::{sort_for_display, Recommendation},
    },
    summaries::repo_types::{DailySummary, NewSummaryRow, SummaryChanges},
    users::{
        dto::UserPatch,
        repo_types::{NewUserRow, User},
    },
};

struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|r| pred(r)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| pred(r)).cloned().collect()
    }

    fn update(&mut self, id: i32, change: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }

    fn remove(&mut self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    foods: Table<Food>,
    meals: Table<Meal>,
    summaries: Table<DailySummary>,
    meal_plans: Table<MealPlan>,
    analytics: Table<NutritionAnalytics>,
    recommendations: Table<Recommendation>,
}

/// Process-local store. Each instance owns its own tables, so tests can build
/// one per case.
#[derive(Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn get_user(&self, id: i32) -> anyhow::Result<Option<User>> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self.tables.read().await.users.find(|u| u.username == username))
    }

    async fn create_user(&self, row: &NewUserRow) -> anyhow::Result<User> {
        let mut t = self.tables.write().await;
        if t.users.find(|u| u.username == row.username).is_some() {
            return Err(DuplicateUsername(row.username.clone()).into());
        }
        Ok(t.users.insert_with(|id| User {
            id,
            username: row.username.clone(),
            password_hash: row.password_hash.clone(),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            created_at: OffsetDateTime::now_utc(),
            calorie_target: row.calorie_target,
            protein_target: row.protein_target,
            carbs_target: row.carbs_target,
            fat_target: row.fat_target,
            diet_type: row.diet_type.clone(),
            allergens: row.allergens.clone(),
        }))
    }

    async fn update_user(&self, id: i32, patch: &UserPatch) -> anyhow::Result<Option<User>> {
        Ok(self.tables.write().await.users.update(id, |u| {
            if let Some(v) = &patch.first_name {
                u.first_name = v.clone();
            }
            if let Some(v) = &patch.last_name {
                u.last_name = v.clone();
            }
            if let Some(v) = &patch.email {
                u.email = v.clone();
            }
            if let Some(v) = patch.calorie_target {
                u.calorie_target = v;
            }
            if let Some(v) = patch.protein_target {
                u.protein_target = v;
            }
            if let Some(v) = patch.carbs_target {
                u.carbs_target = v;
            }
            if let Some(v) = patch.fat_target {
                u.fat_target = v;
            }
            if let Some(v) = &patch.diet_type {
                u.diet_type = v.clone();
            }
            if let Some(v) = &patch.allergens {
                u.allergens = v.clone();
            }
        }))
    }

    async fn get_food(&self, id: i32) -> anyhow::Result<Option<Food>> {
        Ok(self.tables.read().await.foods.get(id))
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        Ok(self.tables.read().await.foods.filter(|_| true))
    }

    async fn foods_by_group(&self, group: &str) -> anyhow::Result<Vec<Food>> {
        Ok(self.tables.read().await.foods.filter(|f| f.food_group == group))
    }

    async fn search_foods(&self, needle: &str) -> anyhow::Result<Vec<Food>> {
        let needle = needle.to_lowercase();
        Ok(self.tables.read().await.foods.filter(|f| f.matches(&needle)))
    }

    async fn create_food(&self, food: &NewFood) -> anyhow::Result<Food> {
        Ok(self.tables.write().await.foods.insert_with(|id| Food {
            id,
            name: food.name.clone(),
            calories: food.calories,
            protein: food.protein,
            carbs: food.carbs,
            fat: food.fat,
            serving_size: food.serving_size.clone(),
            food_group: food.food_group.clone(),
            description: food.description.clone(),
            image_url: food.image_url.clone(),
        }))
    }

    async fn count_foods(&self) -> anyhow::Result<i64> {
        Ok(self.tables.read().await.foods.rows.len() as i64)
    }

    async fn get_meal(&self, id: i32) -> anyhow::Result<Option<Meal>> {
        Ok(self.tables.read().await.meals.get(id))
    }

    async fn meals_by_user(&self, user_id: i32, date: Option<Date>) -> anyhow::Result<Vec<Meal>> {
        Ok(self
            .tables
            .read()
            .await
            .meals
            .filter(|m| m.user_id == user_id && date.map_or(true, |d| m.date == d)))
    }

    async fn create_meal(&self, meal: &NewMeal) -> anyhow::Result<Meal> {
        Ok(self.tables.write().await.meals.insert_with(|id| Meal {
            id,
            user_id: meal.user_id,
            name: meal.name.clone(),
            meal_type: meal.meal_type,
            date: meal.date,
            time: meal.time.clone(),
            calories: meal.calories,
            protein: meal.protein,
            carbs: meal.carbs,
            fat: meal.fat,
            foods: meal.foods.clone(),
            image_url: meal.image_url.clone(),
            description: meal.description.clone(),
        }))
    }

    async fn update_meal(&self, id: i32, patch: &MealPatch) -> anyhow::Result<Option<Meal>> {
        Ok(self.tables.write().await.meals.update(id, |m| patch.apply_to(m)))
    }

    async fn delete_meal(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.tables.write().await.meals.remove(id))
    }

    async fn get_summary(&self, user_id: i32, date: Date) -> anyhow::Result<Option<DailySummary>> {
        Ok(self
            .tables
            .read()
            .await
            .summaries
            .find(|s| s.user_id == user_id && s.date == date))
    }

    async fn create_summary(&self, row: &NewSummaryRow) -> anyhow::Result<DailySummary> {
        let mut t = self.tables.write().await;
        if t.summaries
            .find(|s| s.user_id == row.user_id && s.date == row.date)
            .is_some()
        {
            anyhow::bail!("summary for user {} on {} already exists", row.user_id, row.date);
        }
        Ok(t.summaries.insert_with(|id| DailySummary {
            id,
            user_id: row.user_id,
            date: row.date,
            total_calories: row.total_calories,
            total_protein: row.total_protein,
            total_carbs: row.total_carbs,
            total_fat: row.total_fat,
            completed_meals: row.completed_meals,
            water_intake: row.water_intake,
        }))
    }

    async fn update_summary(
        &self,
        id: i32,
        changes: &SummaryChanges,
    ) -> anyhow::Result<Option<DailySummary>> {
        Ok(self
            .tables
            .write()
            .await
            .summaries
            .update(id, |s| changes.apply_to(s)))
    }

    async fn get_meal_plan(&self, id: i32) -> anyhow::Result<Option<MealPlan>> {
        Ok(self.tables.read().await.meal_plans.get(id))
    }

    async fn active_meal_plan(&self, user_id: i32) -> anyhow::Result<Option<MealPlan>> {
        Ok(self
            .tables
            .read()
            .await
            .meal_plans
            .find(|p| p.user_id == user_id && p.is_active))
    }

    async fn meal_plans_by_user(&self, user_id: i32) -> anyhow::Result<Vec<MealPlan>> {
        Ok(self
            .tables
            .read()
            .await
            .meal_plans
            .filter(|p| p.user_id == user_id))
    }

    async fn create_meal_plan(&self, plan: &NewMealPlan) -> anyhow::Result<MealPlan> {
        Ok(self.tables.write().await.meal_plans.insert_with(|id| MealPlan {
            id,
            user_id: plan.user_id,
            name: plan.name.clone(),
            start_date: plan.start_date,
            end_date: plan.end_date,
            is_active: plan.is_active,
            meals: plan.meals.clone(),
        }))
    }

    async fn update_meal_plan(
        &self,
        id: i32,
        patch: &MealPlanPatch,
    ) -> anyhow::Result<Option<MealPlan>> {
        Ok(self
            .tables
            .write()
            .await
            .meal_plans
            .update(id, |p| patch.apply_to(p)))
    }

    async fn delete_meal_plan(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.tables.write().await.meal_plans.remove(id))
    }

    async fn get_analytics(&self, id: i32) -> anyhow::Result<Option<NutritionAnalytics>> {
        Ok(self.tables.read().await.analytics.get(id))
    }

    async fn analytics_by_user(&self, user_id: i32) -> anyhow::Result<Vec<NutritionAnalytics>> {
        let mut rows = self
            .tables
            .read()
            .await
            .analytics
            .filter(|a| a.user_id == user_id);
        rows.sort_by(|a, b| b.period_start.cmp(&a.period_start).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create_analytics(&self, rollup: &NewAnalytics) -> anyhow::Result<NutritionAnalytics> {
        Ok(self
            .tables
            .write()
            .await
            .analytics
            .insert_with(|id| NutritionAnalytics {
                id,
                user_id: rollup.user_id,
                period_start: rollup.period_start,
                period_end: rollup.period_end,
                avg_calories: rollup.avg_calories,
                avg_protein: rollup.avg_protein,
                avg_carbs: rollup.avg_carbs,
                avg_fat: rollup.avg_fat,
                calorie_trend: rollup.calorie_trend,
                protein_trend: rollup.protein_trend,
                carbs_trend: rollup.carbs_trend,
                fat_trend: rollup.fat_trend,
                target_adherence: rollup.target_adherence,
                most_consumed_foods: rollup.most_consumed_foods.clone(),
                created_at: OffsetDateTime::now_utc(),
            }))
    }

    async fn recommendations_by_user(
        &self,
        user_id: i32,
        active_only: bool,
    ) -> anyhow::Result<Vec<Recommendation>> {
        let mut recs = self
            .tables
            .read()
            .await
            .recommendations
            .filter(|r| r.user_id == user_id && (!active_only || r.is_active));
        sort_for_display(&mut recs);
        Ok(recs)
    }

    async fn create_recommendation(
        &self,
        rec: &NewRecommendation,
    ) -> anyhow::Result<Recommendation> {
        Ok(self
            .tables
            .write()
            .await
            .recommendations
            .insert_with(|id| Recommendation {
                id,
                user_id: rec.user_id,
                kind: rec.kind,
                title: rec.title.clone(),
                description: rec.description.clone(),
                reason: rec.reason.clone(),
                priority: rec.priority,
                suggested_foods: rec.suggested_foods.clone(),
                suggested_meals: rec.suggested_meals.clone(),
                is_active: rec.is_active,
                created_at: OffsetDateTime::now_utc(),
            }))
    }

    async fn update_recommendation(
        &self,
        id: i32,
        patch: &RecommendationPatch,
    ) -> anyhow::Result<Option<Recommendation>> {
        Ok(self.tables.write().await.recommendations.update(id, |r| {
            if let Some(v) = patch.is_active {
                r.is_active = v;
            }
            if let Some(v) = patch.priority {
                r.priority = v;
            }
        }))
    }

    async fn delete_recommendation(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.tables.write().await.recommendations.remove(id))
    }
}
