use tracing::{debug, info, instrument};

use super::{
    dto::{FoodFilter, NewFood},
    repo_types::Food,
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
    validation::Validate,
};

pub async fn list_foods(state: &AppState, filter: FoodFilter) -> AppResult<Vec<Food>> {
    let foods = match &filter {
        FoodFilter::Search(needle) => state.store.search_foods(needle.trim()).await?,
        FoodFilter::Group(group) => state.store.foods_by_group(group.trim()).await?,
        FoodFilter::All => state.store.list_foods().await?,
    };
    debug!(?filter, count = foods.len(), "food catalog query");
    Ok(foods)
}

pub async fn get_food(state: &AppState, id: i32) -> AppResult<Food> {
    state.store.get_food(id).await?.ok_or(AppError::NotFound("Food"))
}

#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_food(state: &AppState, payload: NewFood) -> AppResult<Food> {
    payload.validate()?;
    let food = state.store.create_food(&payload).await?;
    info!(food_id = food.id, "food added to catalog");
    Ok(food)
}
