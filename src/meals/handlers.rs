use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use super::{
    dto::{CreatedMealResponse, MealListQuery, MealPatch, NewMeal},
    repo_types::Meal,
    services,
};
use crate::{
    error::AppResult,
    state::AppState,
    validation::{ValidJson, ValidQuery},
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).patch(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    ValidQuery(q): ValidQuery<MealListQuery>,
) -> AppResult<Json<Vec<Meal>>> {
    Ok(Json(services::list_meals(&state, q.user_id, q.date).await?))
}

#[instrument(skip(state))]
pub async fn get_meal(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Meal>> {
    Ok(Json(services::get_meal(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewMeal>,
) -> AppResult<(StatusCode, Json<CreatedMealResponse>)> {
    let created = services::create_meal(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<MealPatch>,
) -> AppResult<Json<Meal>> {
    Ok(Json(services::update_meal(&state, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_meal(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Value>> {
    services::delete_meal(&state, id).await?;
    Ok(Json(json!({ "success": true })))
}
