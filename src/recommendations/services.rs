use tracing::{info, instrument};

use super::{
    dto::{NewRecommendation, RecommendationPatch, RecommendationQuery},
    repo_types::Recommendation,
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
    validation::Validate,
};

pub async fn list_for_user(state: &AppState, q: RecommendationQuery) -> AppResult<Vec<Recommendation>> {
    Ok(state.store.recommendations_by_user(q.user_id, q.active).await?)
}

#[instrument(skip(state, payload), fields(user_id = payload.user_id, kind = %payload.kind))]
pub async fn create(state: &AppState, payload: NewRecommendation) -> AppResult<Recommendation> {
    payload.validate()?;
    let rec = state.store.create_recommendation(&payload).await?;
    info!(recommendation_id = rec.id, priority = rec.priority, "recommendation created");
    Ok(rec)
}

#[instrument(skip(state))]
pub async fn update(state: &AppState, id: i32, patch: RecommendationPatch) -> AppResult<Recommendation> {
    patch.validate()?;
    state
        .store
        .update_recommendation(id, &patch)
        .await?
        .ok_or(AppError::NotFound("Recommendation"))
}

#[instrument(skip(state))]
pub async fn delete(state: &AppState, id: i32) -> AppResult<()> {
    if !state.store.delete_recommendation(id).await? {
        return Err(AppError::NotFound("Recommendation"));
    }
    info!(recommendation_id = id, "recommendation deleted");
    Ok(())
}
