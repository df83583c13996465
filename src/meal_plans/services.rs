use tracing::{info, instrument};

use super::{
    dto::{MealPlanPatch, MealPlanQuery, NewMealPlan},
    repo_types::MealPlan,
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
    store::Store,
    validation::Validate,
};

/// Clears `is_active` on every active plan of `user_id` except `keep`.
/// Callers hold the user's lock.
async fn deactivate_others(store: &dyn Store, user_id: i32, keep: Option<i32>) -> anyhow::Result<()> {
    for plan in store.meal_plans_by_user(user_id).await? {
        if plan.is_active && Some(plan.id) != keep {
            store.update_meal_plan(plan.id, &MealPlanPatch::deactivate()).await?;
            info!(plan_id = plan.id, user_id, "meal plan deactivated");
        }
    }
    Ok(())
}

pub async fn list_meal_plans(state: &AppState, q: MealPlanQuery) -> AppResult<Vec<MealPlan>> {
    if q.active {
        Ok(state.store.active_meal_plan(q.user_id).await?.into_iter().collect())
    } else {
        Ok(state.store.meal_plans_by_user(q.user_id).await?)
    }
}

pub async fn get_meal_plan(state: &AppState, id: i32) -> AppResult<MealPlan> {
    state
        .store
        .get_meal_plan(id)
        .await?
        .ok_or(AppError::NotFound("Meal plan"))
}

#[instrument(skip(state, payload), fields(user_id = payload.user_id))]
pub async fn create_meal_plan(state: &AppState, payload: NewMealPlan) -> AppResult<MealPlan> {
    payload.validate()?;
    let _guard = state.locks.acquire(payload.user_id).await;

    if payload.is_active {
        deactivate_others(state.store.as_ref(), payload.user_id, None).await?;
    }
    let plan = state.store.create_meal_plan(&payload).await?;
    info!(plan_id = plan.id, active = plan.is_active, "meal plan created");
    Ok(plan)
}

#[instrument(skip(state, patch))]
pub async fn update_meal_plan(state: &AppState, id: i32, patch: MealPlanPatch) -> AppResult<MealPlan> {
    patch.validate()?;
    let owner = get_meal_plan(state, id).await?.user_id;
    let _guard = state.locks.acquire(owner).await;
    let current = get_meal_plan(state, id).await?;

    let mut merged = current.clone();
    patch.apply_to(&mut merged);
    if merged.start_date > merged.end_date {
        return Err(AppError::invalid("startDate must not be after endDate"));
    }

    if patch.activates() && !current.is_active {
        deactivate_others(state.store.as_ref(), current.user_id, Some(id)).await?;
    }
    let plan = state
        .store
        .update_meal_plan(id, &patch)
        .await?
        .ok_or(AppError::NotFound("Meal plan"))?;
    info!(plan_id = id, active = plan.is_active, "meal plan updated");
    Ok(plan)
}

#[instrument(skip(state))]
pub async fn delete_meal_plan(state: &AppState, id: i32) -> AppResult<()> {
    if !state.store.delete_meal_plan(id).await? {
        return Err(AppError::NotFound("Meal plan"));
    }
    info!(plan_id = id, "meal plan deleted");
    Ok(())
}
