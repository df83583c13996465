use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{AnalyticsQuery, NewAnalytics},
    repo_types::NutritionAnalytics,
    services,
};
use crate::{
    error::AppResult,
    state::AppState,
    validation::{ValidJson, ValidQuery},
};

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition-analytics", get(list_analytics).post(create_analytics))
        .route("/nutrition-analytics/:id", get(get_analytics))
}

#[instrument(skip(state))]
pub async fn list_analytics(
    State(state): State<AppState>,
    ValidQuery(q): ValidQuery<AnalyticsQuery>,
) -> AppResult<Json<Vec<NutritionAnalytics>>> {
    Ok(Json(services::list_for_user(&state, q.user_id).await?))
}

#[instrument(skip(state))]
pub async fn get_analytics(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<NutritionAnalytics>> {
    Ok(Json(services::get_analytics(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_analytics(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<NewAnalytics>,
) -> AppResult<(StatusCode, Json<NutritionAnalytics>)> {
    let rollup = services::record(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(rollup)))
}
