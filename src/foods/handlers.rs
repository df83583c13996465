use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{FoodQuery, NewFood},
    repo_types::Food,
    services,
};
use crate::{
    error::AppResult,
    state::AppState,
    validation::{ValidJson, ValidQuery},
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:id", get(get_food))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    ValidQuery(q): ValidQuery<FoodQuery>,
) -> AppResult<Json<Vec<Food>>> {
    Ok(Json(services::list_foods(&state, q.into()).await?))
}

#[instrument(skip(state))]
pub async fn get_food(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Food>> {
    Ok(Json(services::get_food(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewFood>,
) -> AppResult<(StatusCode, Json<Food>)> {
    let food = services::create_food(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(food)))
}
