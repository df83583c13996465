use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use time::Date;
use tracing::info;

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
        repo_types::{Meal, MealFoodItem},
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

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;
        info!(max_connections, "postgres store ready");
        Ok(Self { db })
    }
}

#[derive(Debug, FromRow)]
struct MealRow {
    id: i32,
    user_id: i32,
    name: String,
    meal_type: String,
    date: Date,
    time: String,
    calories: i32,
    protein: i32,
    carbs: i32,
    fat: i32,
    foods: Json<Vec<MealFoodItem>>,
    image_url: Option<String>,
    description: Option<String>,
}

impl TryFrom<MealRow> for Meal {
    type Error = anyhow::Error;

    fn try_from(r: MealRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            meal_type: r.meal_type.parse()?,
            date: r.date,
            time: r.time,
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fat: r.fat,
            foods: r.foods.0,
            image_url: r.image_url,
            description: r.description,
        })
    }
}

#[derive(Debug, FromRow)]
struct RecommendationRow {
    id: i32,
    user_id: i32,
    kind: String,
    title: String,
    description: String,
    reason: String,
    priority: i32,
    suggested_foods: Vec<String>,
    suggested_meals: Vec<String>,
    is_active: bool,
    created_at: time::OffsetDateTime,
}

impl TryFrom<RecommendationRow> for Recommendation {
    type Error = anyhow::Error;

    fn try_from(r: RecommendationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            kind: r.kind.parse()?,
            title: r.title,
            description: r.description,
            reason: r.reason,
            priority: r.priority,
            suggested_foods: r.suggested_foods,
            suggested_meals: r.suggested_meals,
            is_active: r.is_active,
            created_at: r.created_at,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> anyhow::Result<Vec<T>>
where
    T: TryFrom<R, Error = anyhow::Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// `%needle%` with LIKE wildcards in the needle taken literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl Store for PgStore {
    async fn get_user(&self, id: i32) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, first_name, last_name, email, created_at,
                   calorie_target, protein_target, carbs_target, fat_target, diet_type, allergens
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get user")
    }

    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, first_name, last_name, email, created_at,
                   calorie_target, protein_target, carbs_target, fat_target, diet_type, allergens
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("get user by username")
    }

    async fn create_user(&self, row: &NewUserRow) -> anyhow::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, first_name, last_name, email,
                               calorie_target, protein_target, carbs_target, fat_target,
                               diet_type, allergens)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, username, password_hash, first_name, last_name, email, created_at,
                      calorie_target, protein_target, carbs_target, fat_target, diet_type, allergens
            "#,
        )
        .bind(&row.username)
        .bind(&row.password_hash)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.email)
        .bind(row.calorie_target)
        .bind(row.protein_target)
        .bind(row.carbs_target)
        .bind(row.fat_target)
        .bind(&row.diet_type)
        .bind(&row.allergens)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            let taken = matches!(
                &e,
                sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION)
            );
            if taken {
                DuplicateUsername(row.username.clone()).into()
            } else {
                anyhow::Error::new(e).context("insert user")
            }
        })
    }

    async fn update_user(&self, id: i32, patch: &UserPatch) -> anyhow::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                first_name     = COALESCE($2, first_name),
                last_name      = COALESCE($3, last_name),
                email          = COALESCE($4, email),
                calorie_target = COALESCE($5, calorie_target),
                protein_target = COALESCE($6, protein_target),
                carbs_target   = COALESCE($7, carbs_target),
                fat_target     = COALESCE($8, fat_target),
                diet_type      = COALESCE($9, diet_type),
                allergens      = COALESCE($10, allergens)
            WHERE id = $1
            RETURNING id, username, password_hash, first_name, last_name, email, created_at,
                      calorie_target, protein_target, carbs_target, fat_target, diet_type, allergens
            "#,
        )
        .bind(id)
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.email)
        .bind(patch.calorie_target)
        .bind(patch.protein_target)
        .bind(patch.carbs_target)
        .bind(patch.fat_target)
        .bind(&patch.diet_type)
        .bind(&patch.allergens)
        .fetch_optional(&self.db)
        .await
        .context("update user")
    }

    async fn get_food(&self, id: i32) -> anyhow::Result<Option<Food>> {
        sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, serving_size, food_group,
                   description, image_url
            FROM foods
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get food")
    }

    async fn list_foods(&self) -> anyhow::Result<Vec<Food>> {
        sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, serving_size, food_group,
                   description, image_url
            FROM foods
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list foods")
    }

    async fn foods_by_group(&self, group: &str) -> anyhow::Result<Vec<Food>> {
        sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, serving_size, food_group,
                   description, image_url
            FROM foods
            WHERE food_group = $1
            ORDER BY id
            "#,
        )
        .bind(group)
        .fetch_all(&self.db)
        .await
        .context("list foods by group")
    }

    async fn search_foods(&self, needle: &str) -> anyhow::Result<Vec<Food>> {
        sqlx::query_as::<_, Food>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, serving_size, food_group,
                   description, image_url
            FROM foods
            WHERE name ILIKE $1 OR description ILIKE $1 OR food_group ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(like_pattern(needle))
        .fetch_all(&self.db)
        .await
        .context("search foods")
    }

    async fn create_food(&self, food: &NewFood) -> anyhow::Result<Food> {
        sqlx::query_as::<_, Food>(
            r#"
            INSERT INTO foods (name, calories, protein, carbs, fat, serving_size, food_group,
                               description, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, calories, protein, carbs, fat, serving_size, food_group,
                      description, image_url
            "#,
        )
        .bind(&food.name)
        .bind(food.calories)
        .bind(food.protein)
        .bind(food.carbs)
        .bind(food.fat)
        .bind(&food.serving_size)
        .bind(&food.food_group)
        .bind(&food.description)
        .bind(&food.image_url)
        .fetch_one(&self.db)
        .await
        .context("insert food")
    }

    async fn count_foods(&self) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods")
            .fetch_one(&self.db)
            .await
            .context("count foods")?;
        Ok(count)
    }

    async fn get_meal(&self, id: i32) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, user_id, name, meal_type, date, time, calories, protein, carbs, fat,
                   foods, image_url, description
            FROM meals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get meal")?;
        row.map(Meal::try_from).transpose()
    }

    async fn meals_by_user(&self, user_id: i32, date: Option<Date>) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, user_id, name, meal_type, date, time, calories, protein, carbs, fat,
                   foods, image_url, description
            FROM meals
            WHERE user_id = $1 AND ($2::date IS NULL OR date = $2)
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(&self.db)
        .await
        .context("list meals by user")?;
        convert_all(rows)
    }

    async fn create_meal(&self, meal: &NewMeal) -> anyhow::Result<Meal> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            INSERT INTO meals (user_id, name, meal_type, date, time, calories, protein, carbs,
                               fat, foods, image_url, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, user_id, name, meal_type, date, time, calories, protein, carbs, fat,
                      foods, image_url, description
            "#,
        )
        .bind(meal.user_id)
        .bind(&meal.name)
        .bind(meal.meal_type.as_str())
        .bind(meal.date)
        .bind(&meal.time)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.carbs)
        .bind(meal.fat)
        .bind(Json(&meal.foods))
        .bind(&meal.image_url)
        .bind(&meal.description)
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;
        Meal::try_from(row)
    }

    async fn update_meal(&self, id: i32, patch: &MealPatch) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            UPDATE meals SET
                name        = COALESCE($2, name),
                meal_type   = COALESCE($3, meal_type),
                date        = COALESCE($4, date),
                time        = COALESCE($5, time),
                calories    = COALESCE($6, calories),
                protein     = COALESCE($7, protein),
                carbs       = COALESCE($8, carbs),
                fat         = COALESCE($9, fat),
                foods       = COALESCE($10, foods),
                image_url   = COALESCE($11, image_url),
                description = COALESCE($12, description)
            WHERE id = $1
            RETURNING id, user_id, name, meal_type, date, time, calories, protein, carbs, fat,
                      foods, image_url, description
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.meal_type.map(|t| t.as_str()))
        .bind(patch.date)
        .bind(&patch.time)
        .bind(patch.calories)
        .bind(patch.protein)
        .bind(patch.carbs)
        .bind(patch.fat)
        .bind(patch.foods.as_ref().map(Json))
        .bind(&patch.image_url)
        .bind(&patch.description)
        .fetch_optional(&self.db)
        .await
        .context("update meal")?;
        row.map(Meal::try_from).transpose()
    }

    async fn delete_meal(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(res.rows_affected() > 0)
    }

    async fn get_summary(&self, user_id: i32, date: Date) -> anyhow::Result<Option<DailySummary>> {
        sqlx::query_as::<_, DailySummary>(
            r#"
            SELECT id, user_id, date, total_calories, total_protein, total_carbs, total_fat,
                   completed_meals, water_intake
            FROM daily_summaries
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await
        .context("get daily summary")
    }

    async fn create_summary(&self, row: &NewSummaryRow) -> anyhow::Result<DailySummary> {
        sqlx::query_as::<_, DailySummary>(
            r#"
            INSERT INTO daily_summaries (user_id, date, total_calories, total_protein,
                                         total_carbs, total_fat, completed_meals, water_intake)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, date, total_calories, total_protein, total_carbs, total_fat,
                      completed_meals, water_intake
            "#,
        )
        .bind(row.user_id)
        .bind(row.date)
        .bind(row.total_calories)
        .bind(row.total_protein)
        .bind(row.total_carbs)
        .bind(row.total_fat)
        .bind(row.completed_meals)
        .bind(row.water_intake)
        .fetch_one(&self.db)
        .await
        .context("insert daily summary")
    }

    async fn update_summary(
        &self,
        id: i32,
        changes: &SummaryChanges,
    ) -> anyhow::Result<Option<DailySummary>> {
        sqlx::query_as::<_, DailySummary>(
            r#"
            UPDATE daily_summaries SET
                total_calories  = COALESCE($2, total_calories),
                total_protein   = COALESCE($3, total_protein),
                total_carbs     = COALESCE($4, total_carbs),
                total_fat       = COALESCE($5, total_fat),
                completed_meals = COALESCE($6, completed_meals),
                water_intake    = COALESCE($7, water_intake)
            WHERE id = $1
            RETURNING id, user_id, date, total_calories, total_protein, total_carbs, total_fat,
                      completed_meals, water_intake
            "#,
        )
        .bind(id)
        .bind(changes.total_calories)
        .bind(changes.total_protein)
        .bind(changes.total_carbs)
        .bind(changes.total_fat)
        .bind(changes.completed_meals)
        .bind(changes.water_intake)
        .fetch_optional(&self.db)
        .await
        .context("update daily summary")
    }

    async fn get_meal_plan(&self, id: i32) -> anyhow::Result<Option<MealPlan>> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, user_id, name, start_date, end_date, is_active, meals
            FROM meal_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get meal plan")
    }

    async fn active_meal_plan(&self, user_id: i32) -> anyhow::Result<Option<MealPlan>> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, user_id, name, start_date, end_date, is_active, meals
            FROM meal_plans
            WHERE user_id = $1 AND is_active
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get active meal plan")
    }

    async fn meal_plans_by_user(&self, user_id: i32) -> anyhow::Result<Vec<MealPlan>> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, user_id, name, start_date, end_date, is_active, meals
            FROM meal_plans
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list meal plans by user")
    }

    async fn create_meal_plan(&self, plan: &NewMealPlan) -> anyhow::Result<MealPlan> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            INSERT INTO meal_plans (user_id, name, start_date, end_date, is_active, meals)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, start_date, end_date, is_active, meals
            "#,
        )
        .bind(plan.user_id)
        .bind(&plan.name)
        .bind(plan.start_date)
        .bind(plan.end_date)
        .bind(plan.is_active)
        .bind(&plan.meals)
        .fetch_one(&self.db)
        .await
        .context("insert meal plan")
    }

    async fn update_meal_plan(
        &self,
        id: i32,
        patch: &MealPlanPatch,
    ) -> anyhow::Result<Option<MealPlan>> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            UPDATE meal_plans SET
                name       = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date   = COALESCE($4, end_date),
                is_active  = COALESCE($5, is_active),
                meals      = COALESCE($6, meals)
            WHERE id = $1
            RETURNING id, user_id, name, start_date, end_date, is_active, meals
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(patch.is_active)
        .bind(&patch.meals)
        .fetch_optional(&self.db)
        .await
        .context("update meal plan")
    }

    async fn delete_meal_plan(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM meal_plans WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete meal plan")?;
        Ok(res.rows_affected() > 0)
    }

    async fn get_analytics(&self, id: i32) -> anyhow::Result<Option<NutritionAnalytics>> {
        sqlx::query_as::<_, NutritionAnalytics>(
            r#"
            SELECT id, user_id, period_start, period_end, avg_calories, avg_protein, avg_carbs,
                   avg_fat, calorie_trend, protein_trend, carbs_trend, fat_trend,
                   target_adherence, most_consumed_foods, created_at
            FROM nutrition_analytics
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get nutrition analytics")
    }

    async fn analytics_by_user(&self, user_id: i32) -> anyhow::Result<Vec<NutritionAnalytics>> {
        sqlx::query_as::<_, NutritionAnalytics>(
            r#"
            SELECT id, user_id, period_start, period_end, avg_calories, avg_protein, avg_carbs,
                   avg_fat, calorie_trend, protein_trend, carbs_trend, fat_trend,
                   target_adherence, most_consumed_foods, created_at
            FROM nutrition_analytics
            WHERE user_id = $1
            ORDER BY period_start DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list nutrition analytics by user")
    }

    async fn create_analytics(&self, rollup: &NewAnalytics) -> anyhow::Result<NutritionAnalytics> {
        sqlx::query_as::<_, NutritionAnalytics>(
            r#"
            INSERT INTO nutrition_analytics (user_id, period_start, period_end, avg_calories,
                                             avg_protein, avg_carbs, avg_fat, calorie_trend,
                                             protein_trend, carbs_trend, fat_trend,
                                             target_adherence, most_consumed_foods)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, user_id, period_start, period_end, avg_calories, avg_protein,
                      avg_carbs, avg_fat, calorie_trend, protein_trend, carbs_trend, fat_trend,
                      target_adherence, most_consumed_foods, created_at
            "#,
        )
        .bind(rollup.user_id)
        .bind(rollup.period_start)
        .bind(rollup.period_end)
        .bind(rollup.avg_calories)
        .bind(rollup.avg_protein)
        .bind(rollup.avg_carbs)
        .bind(rollup.avg_fat)
        .bind(rollup.calorie_trend)
        .bind(rollup.protein_trend)
        .bind(rollup.carbs_trend)
        .bind(rollup.fat_trend)
        .bind(rollup.target_adherence)
        .bind(&rollup.most_consumed_foods)
        .fetch_one(&self.db)
        .await
        .context("insert nutrition analytics")
    }

    async fn recommendations_by_user(
        &self,
        user_id: i32,
        active_only: bool,
    ) -> anyhow::Result<Vec<Recommendation>> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            r#"
            SELECT id, user_id, kind, title, description, reason, priority, suggested_foods,
                   suggested_meals, is_active, created_at
            FROM recommendations
            WHERE user_id = $1 AND (NOT $2 OR is_active)
            ORDER BY priority DESC, created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(active_only)
        .fetch_all(&self.db)
        .await
        .context("list recommendations by user")?;
        convert_all(rows)
    }

    async fn create_recommendation(
        &self,
        rec: &NewRecommendation,
    ) -> anyhow::Result<Recommendation> {
        let row = sqlx::query_as::<_, RecommendationRow>(
            r#"
            INSERT INTO recommendations (user_id, kind, title, description, reason, priority,
                                         suggested_foods, suggested_meals, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, kind, title, description, reason, priority, suggested_foods,
                      suggested_meals, is_active, created_at
            "#,
        )
        .bind(rec.user_id)
        .bind(rec.kind.as_str())
        .bind(&rec.title)
        .bind(&rec.description)
        .bind(&rec.reason)
        .bind(rec.priority)
        .bind(&rec.suggested_foods)
        .bind(&rec.suggested_meals)
        .bind(rec.is_active)
        .fetch_one(&self.db)
        .await
        .context("insert recommendation")?;
        Recommendation::try_from(row)
    }

    async fn update_recommendation(
        &self,
        id: i32,
        patch: &RecommendationPatch,
    ) -> anyhow::Result<Option<Recommendation>> {
        let row = sqlx::query_as::<_, RecommendationRow>(
            r#"
            UPDATE recommendations SET
                is_active = COALESCE($2, is_active),
                priority  = COALESCE($3, priority)
            WHERE id = $1
            RETURNING id, user_id, kind, title, description, reason, priority, suggested_foods,
                      suggested_meals, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(patch.is_active)
        .bind(patch.priority)
        .fetch_optional(&self.db)
        .await
        .context("update recommendation")?;
        row.map(Recommendation::try_from).transpose()
    }

    async fn delete_recommendation(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM recommendations WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete recommendation")?;
        Ok(res.rows_affected() > 0)
    }

    async fn close(&self) {
        self.db.close().await;
        info!("postgres pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("yog"), "%yog%");
        assert_eq!(like_pattern("100%_oat"), "%100\\%\\_oat%");
    }

    #[test]
    fn meal_row_with_unknown_type_is_rejected() {
        let row = MealRow {
            id: 1,
            user_id: 1,
            name: "x".into(),
            meal_type: "brunch".into(),
            date: time::macros::date!(2024 - 01 - 05),
            time: "10:00".into(),
            calories: 1,
            protein: 1,
            carbs: 1,
            fat: 1,
            foods: Json(vec![]),
            image_url: None,
            description: None,
        };
        assert!(Meal::try_from(row).is_err());
    }
}
