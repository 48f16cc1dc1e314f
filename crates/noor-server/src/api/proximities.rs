use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use noor_core::PlaceRecord;
use noor_proximity::{ProximityMeta, ProximityParams};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_proximity_error, ApiError, ApiResponse, AppState};

/// Query echo and source counts alongside the usual request metadata.
#[derive(Debug, Serialize)]
pub(super) struct ProximityResponseMeta {
    #[serde(flatten)]
    pub query: ProximityMeta,
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

pub(super) async fn find_proximities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<ProximityParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<PlaceRecord>, ProximityResponseMeta>>, ApiError> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            let message = rejection.body_text();
            return Err(ApiError::new(req_id.0, "INVALID_QUERY", message));
        }
    };

    let result = state
        .service
        .find_proximities(&params)
        .await
        .map_err(|e| map_proximity_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result.data,
        meta: ProximityResponseMeta {
            query: result.meta,
            request_id: req_id.0,
            timestamp: Utc::now(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use noor_core::{Coordinate, PlaceCategory, PlaceRecord, PlaceSource};
    use tower::ServiceExt;

    use crate::api::build_app;
    use crate::api::test_support::{fallback_state, state_with, DownExternal, FixedExternal};
    use crate::middleware::RateLimitState;

    fn app(state: crate::api::AppState) -> Router {
        build_app(state, RateLimitState::per_minute(100))
    }

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

    #[tokio::test]
    async fn missing_lat_returns_invalid_query() {
        let (status, json) =
            get_json(app(fallback_state()), "/api/v1/proximities?lng=39.8262").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_QUERY");
        assert!(json["error"]["message"]
            .as_str()
            .is_some_and(|m| !m.is_empty()));
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn non_numeric_lng_returns_invalid_query() {
        let (status, json) = get_json(
            app(fallback_state()),
            "/api/v1/proximities?lat=21.4&lng=east",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn success_returns_data_and_meta() {
        let (status, json) = get_json(
            app(fallback_state()),
            "/api/v1/proximities?lat=21.4225&lng=39.8262&radius=abc&type=mosque",
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], "place-masjid-haram");
        assert_eq!(data[0]["category"], "MOSQUE");
        assert_eq!(data[0]["source"], "LOCAL");
        assert_eq!(data[0]["verified"], true);
        assert_eq!(data[0]["distanceMeters"], 0.0);
        assert_eq!(data[0]["location"]["latitude"], 21.4225);

        let meta = &json["meta"];
        assert_eq!(meta["lat"], 21.4225);
        assert_eq!(meta["lng"], 39.8262);
        assert_eq!(meta["radius"], 5000);
        assert_eq!(meta["type"], "MOSQUE");
        assert_eq!(meta["total"], 1);
        assert_eq!(meta["sources"]["local"], 1);
        assert_eq!(meta["sources"]["external"], 0);
        assert!(meta["request_id"].is_string());
        assert!(meta["timestamp"].is_string());
    }

    #[tokio::test]
    async fn legacy_path_serves_the_same_handler() {
        let (status, json) = get_json(
            app(fallback_state()),
            "/api/proximities?lat=21.4225&lng=39.8262",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["meta"]["type"], "ALL");
        assert_eq!(json["meta"]["total"], 2);
    }

    #[tokio::test]
    async fn external_places_are_merged_and_counted() {
        let external = PlaceRecord {
            id: "osm-node-5".to_string(),
            name: "Al Baik".to_string(),
            category: PlaceCategory::HalalFood,
            location: Coordinate::new(21.4230, 39.8265),
            address: None,
            description: Some("Cuisine: chicken".to_string()),
            verified: false,
            source: PlaceSource::External,
            distance_meters: 63.0,
        };
        let state = state_with(Arc::new(FixedExternal(vec![external])));

        let (status, json) =
            get_json(app(state), "/api/v1/proximities?lat=21.4225&lng=39.8262").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["meta"]["sources"]["external"], 1);
        assert_eq!(json["data"][1]["id"], "osm-node-5");
        assert_eq!(json["data"][1]["source"], "EXTERNAL");
        assert_eq!(json["data"][1]["verified"], false);
    }

    #[tokio::test]
    async fn external_outage_still_returns_ok() {
        let state = state_with(Arc::new(DownExternal));

        let (status, json) =
            get_json(app(state), "/api/v1/proximities?lat=21.4225&lng=39.8262").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["meta"]["sources"]["local"], 2);
        assert_eq!(json["meta"]["sources"]["external"], 0);
    }
}
