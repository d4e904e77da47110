//! Client and transformation pipeline for the OpenStreetMap Overpass API.
//!
//! [`build_query`] renders the Overpass QL for a region, [`OverpassClient`]
//! executes it, and [`normalize_element`] turns each returned element into a
//! [`kidspots_core::NewLocation`]. [`collect_locations`] chains all three.

pub mod client;
pub mod collect;
pub mod error;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::OverpassClient;
pub use collect::{collect_locations, CollectedLocations};
pub use error::OverpassError;
pub use normalize::normalize_element;
pub use query::build_query;
pub use types::{ElementBatch, OverpassCenter, OverpassElement};
