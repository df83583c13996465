use tracing::{error, info, instrument, warn};

use super::{
    dto::{CreatedMealResponse, MealPatch, NewMeal},
    repo_types::Meal,
};
use crate::{
    error::{AppError, AppResult},
    locks::UserGuard,
    state::AppState,
    summaries::services::{add_contribution, on_meal_created, on_meal_deleted, remove_contribution, MacroDelta},
    validation::Validate,
};

pub async fn list_meals(
    state: &AppState,
    user_id: i32,
    date: Option<time::Date>,
) -> AppResult<Vec<Meal>> {
    Ok(state.store.meals_by_user(user_id, date).await?)
}

pub async fn get_meal(state: &AppState, id: i32) -> AppResult<Meal> {
    state.store.get_meal(id).await?.ok_or(AppError::NotFound("Meal"))
}

/// Inserts the meal, then folds it into its day's summary. If the summary
/// write fails the meal is removed again.
#[instrument(skip(state, payload), fields(user_id = payload.user_id))]
pub async fn create_meal(state: &AppState, payload: NewMeal) -> AppResult<CreatedMealResponse> {
    payload.validate()?;
    let _guard = state.locks.acquire(payload.user_id).await;
    let store = state.store.as_ref();

    let meal = store.create_meal(&payload).await?;
    let summary = match on_meal_created(store, &meal).await {
        Ok(s) => s,
        Err(e) => {
            warn!(meal_id = meal.id, error = %format!("{e:#}"), "summary update failed; removing meal");
            if let Err(undo) = store.delete_meal(meal.id).await {
                error!(meal_id = meal.id, error = %format!("{undo:#}"), "could not remove meal after summary failure");
            }
            return Err(e.into());
        }
    };

    info!(meal_id = meal.id, date = %meal.date, calories = meal.calories, "meal logged");
    Ok(CreatedMealResponse { meal, summary })
}

/// Locks the meal's owner and re-reads the meal under the lock.
async fn lock_meal(state: &AppState, id: i32) -> AppResult<(UserGuard, Meal)> {
    let peek = get_meal(state, id).await?;
    let guard = state.locks.acquire(peek.user_id).await;
    let meal = get_meal(state, id).await?;
    Ok((guard, meal))
}

/// Subtracts the stored meal from its summary, then deletes it. If the delete
/// fails the subtraction is added back.
#[instrument(skip(state))]
pub async fn delete_meal(state: &AppState, id: i32) -> AppResult<()> {
    let (_guard, meal) = lock_meal(state, id).await?;
    let store = state.store.as_ref();

    let adjusted = on_meal_deleted(store, &meal).await?;
    let outcome = store.delete_meal(id).await;
    if !matches!(outcome, Ok(true)) {
        if adjusted.is_some() {
            if let Err(undo) = on_meal_created(store, &meal).await {
                error!(meal_id = id, error = %format!("{undo:#}"), "could not restore summary after failed delete");
            }
        }
        return match outcome {
            Err(e) => Err(e.into()),
            _ => Err(AppError::NotFound("Meal")),
        };
    }

    info!(meal_id = id, user_id = meal.user_id, date = %meal.date, "meal deleted");
    Ok(())
}

/// Applies a partial update. When the date or macros change, the old
/// contribution moves out of its day and the new one into the (possibly
/// different) target day.
#[instrument(skip(state, patch))]
pub async fn update_meal(state: &AppState, id: i32, patch: MealPatch) -> AppResult<Meal> {
    patch.validate()?;
    let (_guard, current) = lock_meal(state, id).await?;
    let store = state.store.as_ref();

    if !patch.touches_summary() {
        return store.update_meal(id, &patch).await?.ok_or(AppError::NotFound("Meal"));
    }

    let mut next = current.clone();
    patch.apply_to(&mut next);
    let (old, new) = (MacroDelta::of(&current), MacroDelta::of(&next));

    remove_contribution(store, current.user_id, current.date, old).await?;
    if let Err(e) = add_contribution(store, next.user_id, next.date, new).await {
        if let Err(undo) = add_contribution(store, current.user_id, current.date, old).await {
            error!(meal_id = id, error = %format!("{undo:#}"), "could not restore summary after failed move");
        }
        return Err(e.into());
    }

    let outcome = store.update_meal(id, &patch).await;
    match outcome {
        Ok(Some(meal)) => {
            info!(meal_id = id, date = %meal.date, "meal updated");
            Ok(meal)
        }
        other => {
            warn!(meal_id = id, "meal update failed; reverting summary changes");
            let revert = async {
                remove_contribution(store, next.user_id, next.date, new).await?;
                add_contribution(store, current.user_id, current.date, old).await
            };
            if let Err(undo) = revert.await {
                error!(meal_id = id, error = %format!("{undo:#}"), "could not revert summary changes");
            }
            match other {
                Err(e) => Err(e.into()),
                _ => Err(AppError::NotFound("Meal")),
            }
        }
    }
}
