use tracing::{info, instrument};

use super::{dto::NewAnalytics, repo_types::NutritionAnalytics};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
    validation::Validate,
};

pub async fn list_for_user(state: &AppState, user_id: i32) -> AppResult<Vec<NutritionAnalytics>> {
    Ok(state.store.analytics_by_user(user_id).await?)
}

pub async fn get_analytics(state: &AppState, id: i32) -> AppResult<NutritionAnalytics> {
    state
        .store
        .get_analytics(id)
        .await?
        .ok_or(AppError::NotFound("Nutrition analytics"))
}

#[instrument(skip(state, payload), fields(user_id = payload.user_id))]
pub async fn record(state: &AppState, payload: NewAnalytics) -> AppResult<NutritionAnalytics> {
    payload.validate()?;
    let rollup = state.store.create_analytics(&payload).await?;
    info!(analytics_id = rollup.id, period_start = %rollup.period_start, "nutrition analytics recorded");
    Ok(rollup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn rollup(start: time::Date, end: time::Date) -> NewAnalytics {
        NewAnalytics {
            user_id: 2,
            period_start: start,
            period_end: end,
            avg_calories: 1850.0,
            avg_protein: 90.5,
            avg_carbs: 210.0,
            avg_fat: 62.25,
            calorie_trend: -3.5,
            protein_trend: 1.0,
            carbs_trend: 0.0,
            fat_trend: -0.5,
            target_adherence: 87.5,
            most_consumed_foods: vec!["Oatmeal".into(), "Greek Yogurt".into()],
        }
    }

    #[tokio::test]
    async fn newest_period_comes_first() {
        let state = AppState::in_memory();
        record(&state, rollup(date!(2024 - 01 - 01), date!(2024 - 01 - 07))).await.unwrap();
        record(&state, rollup(date!(2024 - 01 - 15), date!(2024 - 01 - 21))).await.unwrap();
        record(&state, rollup(date!(2024 - 01 - 08), date!(2024 - 01 - 14))).await.unwrap();

        let starts: Vec<_> = list_for_user(&state, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.period_start)
            .collect();
        assert_eq!(
            starts,
            vec![date!(2024 - 01 - 15), date!(2024 - 01 - 08), date!(2024 - 01 - 01)]
        );
    }

    #[tokio::test]
    async fn reversed_period_is_rejected() {
        let state = AppState::in_memory();
        let err = record(&state, rollup(date!(2024 - 02 - 01), date!(2024 - 01 - 01)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(matches!(
            get_analytics(&state, 1).await,
            Err(AppError::NotFound("Nutrition analytics"))
        ));
    }
}
