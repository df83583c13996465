use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{SummaryFields, SummaryQuery, SummaryUpsert, SummaryView},
    repo_types::DailySummary,
    services,
};
use crate::{
    error::AppResult,
    state::AppState,
    validation::{ValidJson, ValidQuery},
};

pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/daily-summaries", get(get_summary).post(upsert_summary))
        .route("/daily-summaries/:id", patch(update_summary))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    ValidQuery(q): ValidQuery<SummaryQuery>,
) -> AppResult<Json<SummaryView>> {
    Ok(Json(services::get_or_default(&state, q.user_id, q.date).await?))
}

#[instrument(skip(state, payload))]
pub async fn upsert_summary(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SummaryUpsert>,
) -> AppResult<(StatusCode, Json<DailySummary>)> {
    let summary = services::upsert(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

#[instrument(skip(state, payload))]
pub async fn update_summary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidJson(payload): ValidJson<SummaryFields>,
) -> AppResult<Json<DailySummary>> {
    Ok(Json(services::update_by_id(&state, id, payload).await?))
}
