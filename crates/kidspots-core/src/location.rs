use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::location_type::LocationType;

/// Raw OSM key/value tags, kept in key order so serialized output is stable.
pub type Tags = BTreeMap<String, String>;

/// A stored place as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub tags: Option<Tags>,
    /// Source identifier in `{element type}/{element id}` form.
    pub osm_id: Option<String>,
}

/// A normalized place that has not been assigned a store id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub tags: Option<Tags>,
    pub osm_id: Option<String>,
}

impl NewLocation {
    #[must_use]
    pub fn into_location(self, id: i64) -> Location {
        Location {
            id,
            location_type: self.location_type,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address,
            website: self.website,
            phone: self.phone,
            opening_hours: self.opening_hours,
            tags: self.tags,
            osm_id: self.osm_id,
        }
    }
}
