mod analytics;
mod app;
mod config;
mod dates;
mod error;
mod foods;
mod locks;
mod meal_plans;
mod meals;
mod recommendations;
mod state;
mod store;
mod summaries;
mod users;
mod validation;

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "nutriplan=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let state = AppState::init(config).await?;
    let addr = state.config.bind_addr()?;
    let store = state.store.clone();

    let result = app::serve(app::build_app(state), addr).await;
    store.close().await;
    tracing::info!("store closed");
    result
}
