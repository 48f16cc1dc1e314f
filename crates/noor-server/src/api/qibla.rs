use axum::{
    extract::{rejection::QueryRejection, Query},
    Extension, Json,
};
use noor_core::{distance_meters, qibla_bearing, Coordinate, KAABA};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_proximity_error, ApiError, ApiResponse, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct QiblaParams {
    lat: Option<String>,
    lng: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct QiblaDirection {
    pub bearing_degrees: f64,
    pub distance_meters: f64,
    pub kaaba: Coordinate,
}

pub(super) async fn qibla_direction(
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<QiblaParams>, QueryRejection>,
) -> Result<Json<ApiResponse<QiblaDirection>>, ApiError> {
    let Query(params) = params.map_err(|e| {
        ApiError::new(req_id.0.clone(), "INVALID_QUERY", e.body_text())
    })?;

    let origin = noor_proximity::parse_coordinate(params.lat.as_deref(), params.lng.as_deref())
        .map_err(|e| map_proximity_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: QiblaDirection {
            bearing_degrees: qibla_bearing(origin),
            distance_meters: distance_meters(origin, KAABA),
            kaaba: KAABA,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
