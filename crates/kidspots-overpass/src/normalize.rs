//! Normalization of raw Overpass elements into [`NewLocation`]s.

use kidspots_core::{LocationType, NewLocation, Tags};

use crate::types::OverpassElement;

const ADDRESS_PARTS: [&str; 3] = ["addr:housenumber", "addr:street", "addr:city"];

/// Converts one Overpass element into a [`NewLocation`].
///
/// Returns `None` when no registered type's predicate matches the tags, or
/// when the element has no usable coordinates. `fallback_address` is used
/// when the tags carry none of the address parts.
#[must_use]
pub fn normalize_element(element: &OverpassElement, fallback_address: &str) -> Option<NewLocation> {
    let tags = &element.tags;
    let location_type = LocationType::classify(tags)?;
    let (latitude, longitude) = element.coordinates()?;

    let name = tag(tags, "name").map_or_else(
        || location_type.config().singular_label().to_string(),
        ToOwned::to_owned,
    );

    let address = format_address(tags).unwrap_or_else(|| fallback_address.to_string());

    Some(NewLocation {
        location_type,
        name,
        latitude,
        longitude,
        address: Some(address),
        website: tag(tags, "website").or_else(|| tag(tags, "url")).map(ToOwned::to_owned),
        phone: tag(tags, "phone").map(ToOwned::to_owned),
        opening_hours: tag(tags, "opening_hours").map(ToOwned::to_owned),
        tags: Some(tags.clone()),
        osm_id: Some(element.osm_id()),
    })
}

/// Looks up a tag, treating an empty value as absent.
fn tag<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Joins house number, street, and city with spaces, skipping absent parts.
fn format_address(tags: &Tags) -> Option<String> {
    let parts: Vec<&str> = ADDRESS_PARTS.iter().filter_map(|key| tag(tags, key)).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
