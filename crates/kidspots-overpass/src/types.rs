//! Overpass API JSON response types.
//!
//! Only the fields the normalizer reads are modelled. Elements are decoded
//! one at a time so a single odd element does not fail the whole response.

use kidspots_core::Tags;
use serde::Deserialize;

/// Top-level `{"elements": [...]}` envelope. A missing `elements` field is
/// treated as an empty result.
#[derive(Debug, Deserialize)]
pub(crate) struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
}

/// One `node`, `way`, or `relation` from an `out center` query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Centroid computed by Overpass for ways and relations.
    #[serde(default)]
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Elements decoded from one response.
#[derive(Debug, Default)]
pub struct ElementBatch {
    pub elements: Vec<OverpassElement>,
    /// Entries in `elements` that did not match [`OverpassElement`]'s shape.
    pub undecodable: usize,
}

impl OverpassElement {
    #[must_use]
    pub fn is_node(&self) -> bool {
        self.element_type == "node"
    }

    /// Source identifier in `{type}/{id}` form, e.g. `way/4242`.
    #[must_use]
    pub fn osm_id(&self) -> String {
        format!("{}/{}", self.element_type, self.id)
    }

    /// Nodes carry their own position; ways and relations use the centroid.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        if self.is_node() {
            match (self.lat, self.lon) {
                (Some(lat), Some(lon)) => Some((lat, lon)),
                _ => None,
            }
        } else {
            self.center.map(|c| (c.lat, c.lon))
        }
    }
}

impl ElementBatch {
    pub(crate) fn from_response(response: OverpassResponse) -> Self {
        let mut batch = Self::default();
        for value in response.elements {
            match serde_json::from_value::<OverpassElement>(value) {
                Ok(element) => batch.elements.push(element),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping undecodable overpass element");
                    batch.undecodable += 1;
                }
            }
        }
        batch
    }
}
