use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use super::{
    dto::{MealPlanPatch, MealPlanQuery, NewMealPlan},
    repo_types::MealPlan,
    services,
};
use crate::{
    error::AppResult,
    state::AppState,
    validation::{ValidJson, ValidQuery},
};

pub fn meal_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", get(list_meal_plans).post(create_meal_plan))
        .route(
            "/meal-plans/:id",
            get(get_meal_plan).patch(update_meal_plan).delete(delete_meal_plan),
        )
}

#[instrument(skip(state))]
pub async fn list_meal_plans(
    State(state): State<AppState>,
    ValidQuery(q): ValidQuery<MealPlanQuery>,
) -> AppResult<Json<Vec<MealPlan>>> {
    Ok(Json(services::list_meal_plans(&state, q).await?))
}

#[instrument(skip(state))]
pub async fn get_meal_plan(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<MealPlan>> {
    Ok(Json(services::get_meal_plan(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewMealPlan>,
) -> AppResult<(StatusCode, Json<MealPlan>)> {
    let plan = services::create_meal_plan(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

#[instrument(skip(state, payload))]
pub async fn update_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<MealPlanPatch>,
) -> AppResult<Json<MealPlan>> {
    Ok(Json(services::update_meal_plan(&state, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_meal_plan(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Value>> {
    services::delete_meal_plan(&state, id).await?;
    Ok(Json(json!({ "success": true })))
}
