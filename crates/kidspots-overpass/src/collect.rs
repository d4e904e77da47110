use kidspots_core::{NewLocation, Region};

use crate::client::OverpassClient;
use crate::error::OverpassError;
use crate::normalize::normalize_element;
use crate::query::build_query;

/// Normalized places from one Overpass round trip.
#[derive(Debug, Default)]
pub struct CollectedLocations {
    pub locations: Vec<NewLocation>,
    /// Elements dropped because they could not be decoded, matched no
    /// registered type, or had no coordinates.
    pub skipped: usize,
}

/// Queries Overpass for every registered type inside `region` and
/// normalizes the result.
///
/// Dropped elements are counted, not reported as errors.
///
/// # Errors
///
/// Returns [`OverpassError`] if the request fails or the response is not
/// valid JSON.
pub async fn collect_locations(
    client: &OverpassClient,
    region: &Region,
) -> Result<CollectedLocations, OverpassError> {
    let query = build_query(&region.bounds);
    let batch = client.fetch_elements(&query).await?;

    let mut collected = CollectedLocations {
        locations: Vec::with_capacity(batch.elements.len()),
        skipped: batch.undecodable,
    };

    for element in &batch.elements {
        match normalize_element(element, &region.label) {
            Some(location) => collected.locations.push(location),
            None => {
                tracing::debug!(osm_id = %element.osm_id(), "element not applicable; skipping");
                collected.skipped += 1;
            }
        }
    }

    Ok(collected)
}
