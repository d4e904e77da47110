use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use kidspots_core::{Location, LocationType};
use serde::Serialize;

use crate::middleware::RequestId;
use crate::refresh::refresh_locations;

use super::{map_store_error, ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct RefreshResponse {
    pub message: String,
    pub count: usize,
    pub skipped: usize,
    pub locations: Vec<Location>,
}

#[derive(Debug, Serialize)]
pub(super) struct LocationsSummary {
    pub total: usize,
    pub by_type: BTreeMap<LocationType, usize>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

pub(super) async fn list_locations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let locations = state
        .store
        .list_locations()
        .map_err(|e| map_store_error(req_id.0, &e))?;
    Ok(Json(locations))
}

pub(super) async fn list_locations_by_type(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(location_type): Path<String>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let Ok(location_type) = location_type.parse::<LocationType>() else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "Invalid location type",
        ));
    };

    let locations = state
        .store
        .list_locations_by_type(location_type)
        .map_err(|e| map_store_error(req_id.0, &e))?;
    Ok(Json(locations))
}

pub(super) async fn get_location_by_osm_id(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((element_type, element_id)): Path<(String, String)>,
) -> Result<Json<Location>, ApiError> {
    let Ok(element_id) = element_id.parse::<i64>() else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "Invalid OpenStreetMap id",
        ));
    };
    let osm_id = format!("{element_type}/{element_id}");
    let location = state
        .store
        .get_location_by_osm_id(&osm_id)
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    location
        .map(Json)
        .ok_or_else(|| ApiError::new(req_id.0, "not_found", "Location not found"))
}

pub(super) async fn get_locations_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<LocationsSummary>, ApiError> {
    let store = &state.store;
    let summary = store
        .count_by_type()
        .and_then(|by_type| {
            Ok(LocationsSummary {
                total: by_type.values().sum(),
                by_type,
                refreshed_at: store.last_refreshed_at()?,
            })
        })
        .map_err(|e| map_store_error(req_id.0, &e))?;
    Ok(Json(summary))
}

pub(super) async fn refresh(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<RefreshResponse>, ApiError> {
    match refresh_locations(&state.overpass, &state.store, &state.region).await {
        Ok(outcome) => Ok(Json(RefreshResponse {
            message: format!("Successfully loaded {} locations", outcome.count),
            count: outcome.count,
            skipped: outcome.skipped,
            locations: outcome.locations,
        })),
        Err(e) => {
            tracing::error!(error = %e, request_id = %req_id.0, "location refresh failed");
            Err(
                ApiError::new(req_id.0, "upstream_error", "Failed to refresh location data")
                    .with_error(e.to_string()),
            )
        }
    }
}
