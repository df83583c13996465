use crate::state::AppState;
use axum::Router;

pub mod dto;
mod handlers;
pub mod repo_types;
mod services;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::meal_plan_routes())
}
