mod proximities;
mod qibla;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use noor_proximity::{ProximityError, ProximityService};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub service: ProximityService,
    /// `None` when no database is configured; verified places then come from
    /// the built-in seed set.
    pub pool: Option<PgPool>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize, M: Serialize = ResponseMeta> {
    pub data: T,
    pub meta: M,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "INVALID_QUERY" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_proximity_error(request_id: String, error: &ProximityError) -> ApiError {
    match error {
        ProximityError::InvalidQuery(message) => {
            tracing::debug!(request_id = %request_id, error = %message, "rejected proximity query");
            ApiError::new(request_id, "INVALID_QUERY", message.clone())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn query_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/proximities", get(proximities::find_proximities))
        // Unversioned path kept for the PWA client.
        .route("/api/proximities", get(proximities::find_proximities))
        .route("/api/v1/qibla", get(qibla::qibla_direction))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(query_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    let Some(pool) = state.pool.as_ref() else {
        return (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "fallback",
                },
                meta,
            }),
        );
    };

    match noor_db::health_check(pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::fallback_state;
    use super::*;
    use crate::middleware::RateLimitState;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn api_error_invalid_query_maps_to_bad_request() {
        let response = ApiError::new("req-1", "INVALID_QUERY", "lat is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "boom", "unexpected").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_without_database_reports_fallback() {
        let app = build_app(fallback_state(), RateLimitState::per_minute(10));

        let (status, json) = get_json(app, "/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["database"], "fallback");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn health_with_unreachable_database_is_degraded() {
        let pool_config = noor_db::PoolConfig {
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
        };
        let pool = noor_db::connect_pool_lazy("postgres://noor@127.0.0.1:1/noor", pool_config)
            .expect("lazy pool");
        let state = AppState {
            pool: Some(pool),
            ..fallback_state()
        };
        let app = build_app(state, RateLimitState::per_minute(10));

        let (status, json) = get_json(app, "/api/v1/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["data"]["status"], "degraded");
    }

    #[tokio::test]
    async fn health_is_not_rate_limited() {
        let app = build_app(fallback_state(), RateLimitState::per_minute(0));

        let (status, _) = get_json(app, "/api/v1/health").await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn query_routes_are_rate_limited() {
        let app = build_app(fallback_state(), RateLimitState::per_minute(0));

        let (status, json) = get_json(app, "/api/v1/proximities?lat=21.4225&lng=39.8262").await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"]["code"], "rate_limited");
    }
}
