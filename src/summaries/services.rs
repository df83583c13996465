use anyhow::anyhow;
use time::Date;
use tracing::{info, warn};

use super::{
    dto::{SummaryFields, SummaryUpsert, SummaryView},
    repo_types::{DailySummary, NewSummaryRow, SummaryChanges},
};
use crate::{
    error::{AppError, AppResult},
    meals::repo_types::Meal,
    state::AppState,
    store::Store,
    validation::Validate,
};

/// Signed contribution of meals to a day's totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroDelta {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub meals: i32,
}

impl MacroDelta {
    pub fn of(meal: &Meal) -> Self {
        Self {
            calories: meal.calories,
            protein: meal.protein,
            carbs: meal.carbs,
            fat: meal.fat,
            meals: 1,
        }
    }

    pub fn negate(self) -> Self {
        Self {
            calories: -self.calories,
            protein: -self.protein,
            carbs: -self.carbs,
            fat: -self.fat,
            meals: -self.meals,
        }
    }

    fn added_to(self, s: &DailySummary) -> anyhow::Result<SummaryChanges> {
        let sum = |field: &str, total: i32, delta: i32| {
            total.checked_add(delta).ok_or_else(|| {
                anyhow!("{field} of daily summary {} out of range ({total} + {delta})", s.id)
            })
        };
        Ok(SummaryChanges {
            total_calories: Some(sum("totalCalories", s.total_calories, self.calories)?),
            total_protein: Some(sum("totalProtein", s.total_protein, self.protein)?),
            total_carbs: Some(sum("totalCarbs", s.total_carbs, self.carbs)?),
            total_fat: Some(sum("totalFat", s.total_fat, self.fat)?),
            completed_meals: Some(sum("completedMeals", s.completed_meals, self.meals)?),
            water_intake: None,
        })
    }
}

async fn write_changes(
    store: &dyn Store,
    summary: &DailySummary,
    changes: &SummaryChanges,
) -> anyhow::Result<DailySummary> {
    store
        .update_summary(summary.id, changes)
        .await?
        .ok_or_else(|| anyhow!("daily summary {} vanished during update", summary.id))
}

/// Adds `delta` to the summary of `(user_id, date)`, creating the row when
/// the day has none yet. Callers hold the user's lock.
pub async fn add_contribution(
    store: &dyn Store,
    user_id: i32,
    date: Date,
    delta: MacroDelta,
) -> anyhow::Result<DailySummary> {
    match store.get_summary(user_id, date).await? {
        Some(current) => write_changes(store, &current, &delta.added_to(&current)?).await,
        None => {
            let created = store
                .create_summary(&NewSummaryRow {
                    user_id,
                    date,
                    total_calories: delta.calories,
                    total_protein: delta.protein,
                    total_carbs: delta.carbs,
                    total_fat: delta.fat,
                    completed_meals: delta.meals,
                    water_intake: 0,
                })
                .await?;
            info!(summary_id = created.id, user_id, %date, "daily summary created");
            Ok(created)
        }
    }
}

/// Subtracts `delta` from the summary of `(user_id, date)`. A missing row is
/// reported and skipped; totals are allowed to go negative.
pub async fn remove_contribution(
    store: &dyn Store,
    user_id: i32,
    date: Date,
    delta: MacroDelta,
) -> anyhow::Result<Option<DailySummary>> {
    let Some(current) = store.get_summary(user_id, date).await? else {
        warn!(user_id, %date, "no daily summary to subtract from; totals out of sync");
        return Ok(None);
    };
    let updated = write_changes(store, &current, &delta.negate().added_to(&current)?).await?;
    if updated.has_negative_totals() {
        warn!(
            summary_id = updated.id,
            user_id,
            %date,
            total_calories = updated.total_calories,
            completed_meals = updated.completed_meals,
            "daily summary went negative"
        );
    }
    Ok(Some(updated))
}

pub async fn on_meal_created(store: &dyn Store, meal: &Meal) -> anyhow::Result<DailySummary> {
    add_contribution(store, meal.user_id, meal.date, MacroDelta::of(meal)).await
}

pub async fn on_meal_deleted(store: &dyn Store, meal: &Meal) -> anyhow::Result<Option<DailySummary>> {
    remove_contribution(store, meal.user_id, meal.date, MacroDelta::of(meal)).await
}

/// Stored summary, or a zero-valued shape that is not persisted.
pub async fn get_or_default(state: &AppState, user_id: i32, date: Date) -> AppResult<SummaryView> {
    Ok(match state.store.get_summary(user_id, date).await? {
        Some(s) => s.into(),
        None => SummaryView::empty(user_id, date),
    })
}

/// Overwrites the given fields of the day's summary, creating it if needed.
pub async fn upsert(state: &AppState, payload: SummaryUpsert) -> AppResult<DailySummary> {
    payload.validate()?;
    let _guard = state.locks.acquire(payload.user_id).await;

    let changes = SummaryChanges::from(&payload.fields);
    let summary = match state.store.get_summary(payload.user_id, payload.date).await? {
        Some(current) => write_changes(state.store.as_ref(), &current, &changes).await?,
        None => {
            let f = &payload.fields;
            state
                .store
                .create_summary(&NewSummaryRow {
                    user_id: payload.user_id,
                    date: payload.date,
                    total_calories: f.total_calories.unwrap_or(0),
                    total_protein: f.total_protein.unwrap_or(0),
                    total_carbs: f.total_carbs.unwrap_or(0),
                    total_fat: f.total_fat.unwrap_or(0),
                    completed_meals: f.completed_meals.unwrap_or(0),
                    water_intake: f.water_intake.unwrap_or(0),
                })
                .await?
        }
    };
    info!(summary_id = summary.id, user_id = summary.user_id, date = %summary.date, "daily summary upserted");
    Ok(summary)
}

pub async fn update_by_id(state: &AppState, id: i32, fields: SummaryFields) -> AppResult<DailySummary> {
    fields.validate()?;
    state
        .store
        .update_summary(id, &SummaryChanges::from(&fields))
        .await?
        .ok_or(AppError::NotFound("Daily summary"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        meals::repo_types::MealType,
        store::MemStore,
    };
    use time::macros::date;

    fn meal(id: i32, calories: i32, protein: i32, carbs: i32, fat: i32) -> Meal {
        Meal {
            id,
            user_id: 1,
            name: format!("meal {id}"),
            meal_type: MealType::Lunch,
            date: date!(2024 - 01 - 05),
            time: "12:00".into(),
            calories,
            protein,
            carbs,
            fat,
            foods: vec![],
            image_url: None,
            description: None,
        }
    }

    fn totals(s: &DailySummary) -> (i32, i32, i32, i32, i32) {
        (s.total_calories, s.total_protein, s.total_carbs, s.total_fat, s.completed_meals)
    }

    #[tokio::test]
    async fn first_meal_seeds_and_later_meals_add() {
        let store = MemStore::new();
        let s = on_meal_created(&store, &meal(1, 300, 20, 30, 10)).await.unwrap();
        assert_eq!(totals(&s), (300, 20, 30, 10, 1));
        assert_eq!(s.water_intake, 0);

        let s = on_meal_created(&store, &meal(2, 200, 10, 15, 5)).await.unwrap();
        assert_eq!(totals(&s), (500, 30, 45, 15, 2));
    }

    #[tokio::test]
    async fn totals_equal_sum_of_logged_meals() {
        let store = MemStore::new();
        let meals: Vec<_> = (1..=6).map(|i| meal(i, 100 * i, i, 2 * i, 3 * i)).collect();
        let mut last = None;
        for m in &meals {
            last = Some(on_meal_created(&store, m).await.unwrap());
        }
        let s = last.unwrap();
        assert_eq!(s.total_calories, meals.iter().map(|m| m.calories).sum::<i32>());
        assert_eq!(s.total_fat, meals.iter().map(|m| m.fat).sum::<i32>());
        assert_eq!(s.completed_meals, meals.len() as i32);
    }

    #[tokio::test]
    async fn deleting_restores_previous_totals() {
        let store = MemStore::new();
        let before = on_meal_created(&store, &meal(1, 300, 20, 30, 10)).await.unwrap();
        let extra = meal(2, 250, 12, 40, 7);
        on_meal_created(&store, &extra).await.unwrap();
        let after = on_meal_deleted(&store, &extra).await.unwrap().unwrap();
        assert_eq!(totals(&after), totals(&before));
    }

    #[tokio::test]
    async fn delete_without_summary_is_skipped() {
        let store = MemStore::new();
        let out = on_meal_deleted(&store, &meal(1, 300, 20, 30, 10)).await.unwrap();
        assert!(out.is_none());
        assert!(store.get_summary(1, date!(2024 - 01 - 05)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inconsistent_delete_goes_negative_without_clamping() {
        let store = MemStore::new();
        on_meal_created(&store, &meal(1, 100, 5, 5, 5)).await.unwrap();
        let s = on_meal_deleted(&store, &meal(9, 400, 5, 5, 5)).await.unwrap().unwrap();
        assert_eq!(s.total_calories, -300);
        assert_eq!(s.completed_meals, 0);
    }

    #[tokio::test]
    async fn overflowing_totals_fail_without_touching_the_row() {
        let store = MemStore::new();
        let before = on_meal_created(&store, &meal(1, i32::MAX, 1, 1, 1)).await.unwrap();
        let err = on_meal_created(&store, &meal(2, 1, 1, 1, 1)).await.unwrap_err();
        assert!(err.to_string().contains("totalCalories"), "{err:#}");
        let after = store.get_summary(1, date!(2024 - 01 - 05)).await.unwrap().unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn water_intake_survives_meal_aggregation() {
        let state = AppState::in_memory();
        let day = date!(2024 - 01 - 05);
        upsert(
            &state,
            SummaryUpsert {
                user_id: 1,
                date: day,
                fields: SummaryFields { water_intake: Some(4), ..Default::default() },
            },
        )
        .await
        .unwrap();
        let s = on_meal_created(state.store.as_ref(), &meal(1, 300, 20, 30, 10)).await.unwrap();
        assert_eq!(s.water_intake, 4);
        assert_eq!(s.total_calories, 300);
    }

    #[tokio::test]
    async fn upsert_overwrites_instead_of_adding() {
        let state = AppState::in_memory();
        on_meal_created(state.store.as_ref(), &meal(1, 300, 20, 30, 10)).await.unwrap();
        let s = upsert(
            &state,
            SummaryUpsert {
                user_id: 1,
                date: date!(2024 - 01 - 05),
                fields: SummaryFields { total_calories: Some(1200), ..Default::default() },
            },
        )
        .await
        .unwrap();
        assert_eq!(totals(&s), (1200, 20, 30, 10, 1));
    }

    #[tokio::test]
    async fn reading_a_missing_day_does_not_create_it() {
        let state = AppState::in_memory();
        let day = date!(2024 - 02 - 29);
        let view = get_or_default(&state, 3, day).await.unwrap();
        assert_eq!(view, SummaryView::empty(3, day));
        assert!(state.store.get_summary(3, day).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_by_unknown_id_is_not_found() {
        let state = AppState::in_memory();
        let err = update_by_id(&state, 42, SummaryFields::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Daily summary")));
    }
}
