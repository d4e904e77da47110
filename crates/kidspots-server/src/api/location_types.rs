use axum::Json;
use kidspots_core::{LocationType, LOCATION_TYPES};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(super) struct LocationTypeItem {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub predicate: String,
    pub color: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
}

/// Serves the type registry so map clients style markers and filters
/// from the same table the server classifies with.
pub(super) async fn list_location_types() -> Json<Vec<LocationTypeItem>> {
    Json(
        LOCATION_TYPES
            .iter()
            .map(|config| LocationTypeItem {
                location_type: config.location_type,
                predicate: config.predicate(),
                color: config.color,
                icon: config.icon,
                name: config.label,
            })
            .collect(),
    )
}
