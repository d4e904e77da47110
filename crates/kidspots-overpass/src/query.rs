//! Overpass QL query construction.

use std::fmt::Write;

use kidspots_core::{BoundingBox, LOCATION_TYPES};

/// Server-side timeout hint embedded in the query header, in seconds.
pub const QUERY_TIMEOUT_SECS: u32 = 90;

const ELEMENT_KINDS: [&str; 3] = ["node", "way", "relation"];

/// Builds one query that selects every registered place type inside
/// `bounds` and asks for centroids of ways and relations.
#[must_use]
pub fn build_query(bounds: &BoundingBox) -> String {
    let mut query = format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}][bbox:{bounds}];\n(\n");

    for config in &LOCATION_TYPES {
        let predicate = config.predicate();
        for kind in ELEMENT_KINDS {
            // Writing to a String cannot fail.
            let _ = writeln!(query, "  {kind}[{predicate}]({bounds});");
        }
    }

    query.push_str(");\nout center;\n");
    query
}
