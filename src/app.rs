use std::net::SocketAddr;

use axum::{
    http::{HeaderValue, Request},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::state::AppState;
use crate::{analytics, foods, meal_plans, meals, recommendations, summaries, users};

/// `req_<uuid>` ids for requests that arrive without an `x-request-id`.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(users::router())
                .merge(foods::router())
                .merge(meals::router())
                .merge(summaries::router())
                .merge(meal_plans::router())
                .merge(analytics::router())
                .merge(recommendations::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    let request_id = req
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-")
                        .to_owned();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        %request_id,
                        status = tracing::field::Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::foods::seed::seed_default_foods;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    fn meal(user_id: i32, date: &str, calories: i32, protein: i32, carbs: i32, fat: i32) -> Value {
        json!({
            "userId": user_id, "name": "Meal", "type": "lunch",
            "date": date, "time": "12:30",
            "calories": calories, "protein": protein, "carbs": carbs, "fat": fat,
            "foods": [{ "id": 1, "quantity": 1, "unit": "serving" }]
        })
    }

    fn totals(summary: &Value) -> [i64; 5] {
        [
            summary["totalCalories"].as_i64().unwrap(),
            summary["totalProtein"].as_i64().unwrap(),
            summary["totalCarbs"].as_i64().unwrap(),
            summary["totalFat"].as_i64().unwrap(),
            summary["completedMeals"].as_i64().unwrap(),
        ]
    }

    fn plan(name: &str, is_active: bool) -> Value {
        json!({
            "userId": 7, "name": name, "startDate": "2024-01-01", "endDate": "2024-01-31",
            "isActive": is_active, "meals": { "monday": ["Oatmeal"] }
        })
    }

    #[tokio::test]
    async fn health_responds_with_request_id() {
        let app = build_app(AppState::in_memory());
        let res = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
        assert!(id.starts_with("req_"));
    }

    #[tokio::test]
    async fn summary_tracks_meal_creates_and_deletes() {
        let app = build_app(AppState::in_memory());

        let (status, first) = send(&app, Method::POST, "/api/meals", Some(meal(1, "2024-01-05", 300, 20, 30, 10))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(totals(&first["summary"]), [300, 20, 30, 10, 1]);

        let (_, second) = send(&app, Method::POST, "/api/meals", Some(meal(1, "2024-01-05", 200, 10, 15, 5))).await;
        assert_eq!(totals(&second["summary"]), [500, 30, 45, 15, 2]);
        assert_eq!(second["meal"]["type"], "lunch");
        assert_eq!(second["meal"]["date"], "2024-01-05");

        let first_id = first["meal"]["id"].as_i64().unwrap();
        let (status, body) = send(&app, Method::DELETE, &format!("/api/meals/{first_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (_, summary) = send(&app, Method::GET, "/api/daily-summaries?userId=1&date=2024-01-05", None).await;
        assert_eq!(totals(&summary), [200, 10, 15, 5, 1]);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/meals/{first_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_the_latest_active_plan_stays_active() {
        let app = build_app(AppState::in_memory());

        let (status, a) = send(&app, Method::POST, "/api/meal-plans", Some(plan("A", true))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, b) = send(&app, Method::POST, "/api/meal-plans", Some(plan("B", true))).await;

        let (_, active) = send(&app, Method::GET, "/api/meal-plans?userId=7&active=true", None).await;
        assert_eq!(active.as_array().unwrap().len(), 1);
        assert_eq!(active[0]["id"], b["id"]);

        let a_id = a["id"].as_i64().unwrap();
        let (_, a_now) = send(&app, Method::GET, &format!("/api/meal-plans/{a_id}"), None).await;
        assert_eq!(a_now["isActive"], false);

        let (_, all) = send(&app, Method::GET, "/api/meal-plans?userId=7", None).await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn food_search_is_case_insensitive() {
        let state = AppState::in_memory();
        seed_default_foods(state.store.as_ref()).await.unwrap();
        let app = build_app(state);

        let (status, hits) = send(&app, Method::GET, "/api/foods?q=yog", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = hits.as_array().unwrap().iter().map(|f| f["name"].clone()).collect();
        assert_eq!(names, vec![json!("Greek Yogurt")]);

        let (_, all) = send(&app, Method::GET, "/api/foods", None).await;
        assert_eq!(all.as_array().unwrap().len(), 10);

        let (_, both) = send(&app, Method::GET, "/api/foods?group=dairy&q=salmon", None).await;
        assert_eq!(both[0]["name"], "Salmon");
    }

    #[tokio::test]
    async fn invalid_meal_is_rejected_before_any_write() {
        let app = build_app(AppState::in_memory());
        let mut body = meal(1, "2024-01-05", 300, 20, 30, 10);
        body.as_object_mut().unwrap().remove("calories");

        let (status, err) = send(&app, Method::POST, "/api/meals", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["message"], "Validation error");

        let (_, summary) = send(&app, Method::GET, "/api/daily-summaries?userId=1&date=2024-01-05", None).await;
        assert_eq!(totals(&summary), [0, 0, 0, 0, 0]);
        let (_, meals) = send(&app, Method::GET, "/api/meals?userId=1", None).await;
        assert_eq!(meals, json!([]));
    }

    #[tokio::test]
    async fn missing_summary_reads_as_zero_without_an_id() {
        let app = build_app(AppState::in_memory());
        let (status, summary) = send(&app, Method::GET, "/api/daily-summaries?userId=9&date=2024-03-01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(summary.get("id").is_none());
        assert_eq!(summary["waterIntake"], 0);
        assert_eq!(summary["date"], "2024-03-01");
    }

    #[tokio::test]
    async fn manual_summary_upsert_overwrites_fields() {
        let app = build_app(AppState::in_memory());
        send(&app, Method::POST, "/api/meals", Some(meal(2, "2024-01-05", 300, 20, 30, 10))).await;

        let body = json!({ "userId": 2, "date": "2024-01-05", "totalCalories": 280, "waterIntake": 5 });
        let (status, summary) = send(&app, Method::POST, "/api/daily-summaries", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(totals(&summary), [280, 20, 30, 10, 1]);
        assert_eq!(summary["waterIntake"], 5);

        let id = summary["id"].as_i64().unwrap();
        let (status, patched) =
            send(&app, Method::PATCH, &format!("/api/daily-summaries/{id}"), Some(json!({ "waterIntake": 8 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["waterIntake"], 8);
        assert_eq!(patched["totalCalories"], 280);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let app = build_app(AppState::in_memory());
        let user = json!({
            "username": "sam", "password": "long-enough-pw", "firstName": "Sam",
            "lastName": "Reyes", "email": "sam@example.com"
        });

        let (status, created) = send(&app, Method::POST, "/api/users", Some(user.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created.get("passwordHash").is_none());
        assert_eq!(created["calorieTarget"], 2000);

        let (status, err) = send(&app, Method::POST, "/api/users", Some(user)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["message"], "Username already exists");
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let app = build_app(AppState::in_memory());
        for uri in ["/api/meals/41", "/api/meal-plans/41", "/api/foods/41", "/api/users/41", "/api/nutrition-analytics/41"] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert!(body["message"].as_str().unwrap().ends_with("not found"));
        }
        let (status, _) =
            send(&app, Method::PATCH, "/api/meal-plans/41", Some(json!({ "isActive": true }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn recommendations_come_back_by_priority() {
        let app = build_app(AppState::in_memory());
        for (title, priority) in [("Eat greens", 2), ("Hydrate", 5), ("Add protein", 4)] {
            let body = json!({
                "userId": 3, "type": "nutrient", "title": title,
                "description": "d", "reason": "r", "priority": priority
            });
            let (status, _) = send(&app, Method::POST, "/api/recommendations", Some(body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let (_, recs) = send(&app, Method::GET, "/api/recommendations?userId=3&active=true", None).await;
        let titles: Vec<_> = recs.as_array().unwrap().iter().map(|r| r["title"].clone()).collect();
        assert_eq!(titles, vec![json!("Hydrate"), json!("Add protein"), json!("Eat greens")]);
    }
}
