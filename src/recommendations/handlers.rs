use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use super::{
    dto::{NewRecommendation, RecommendationPatch, RecommendationQuery},
    repo_types::Recommendation,
    services,
};
use crate::{
    error::AppResult,
    state::AppState,
    validation::{ValidJson, ValidQuery},
};

pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations", get(list_recommendations).post(create_recommendation))
        .route(
            "/recommendations/:id",
            patch(update_recommendation).delete(delete_recommendation),
        )
}

#[instrument(skip(state))]
pub async fn list_recommendations(
    State(state): State<AppState>,
    ValidQuery(q): ValidQuery<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    Ok(Json(services::list_for_user(&state, q).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_recommendation(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewRecommendation>,
) -> AppResult<(StatusCode, Json<Recommendation>)> {
    let rec = services::create(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(rec)))
}

#[instrument(skip(state, payload))]
pub async fn update_recommendation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<RecommendationPatch>,
) -> AppResult<Json<Recommendation>> {
    Ok(Json(services::update(&state, id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_recommendation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Value>> {
    services::delete(&state, id).await?;
    Ok(Json(json!({ "success": true })))
}
