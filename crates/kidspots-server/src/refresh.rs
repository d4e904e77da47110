//! The refresh pipeline: query Overpass, normalize, and swap the store's
//! contents in one step.

use std::time::Instant;

use kidspots_core::{Location, Region};
use kidspots_overpass::{collect_locations, OverpassClient, OverpassError};
use kidspots_store::{LocationStore, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] OverpassError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct RefreshOutcome {
    pub count: usize,
    pub skipped: usize,
    pub locations: Vec<Location>,
}

/// Fetches fresh data for `region` and replaces the store's collection.
///
/// The store is only touched after the fetch and parse have succeeded, so a
/// failed refresh leaves the previous collection in place.
///
/// # Errors
///
/// Returns [`RefreshError::Fetch`] on any Overpass failure and
/// [`RefreshError::Store`] if the store lock is poisoned.
pub async fn refresh_locations(
    client: &OverpassClient,
    store: &LocationStore,
    region: &Region,
) -> Result<RefreshOutcome, RefreshError> {
    let started = Instant::now();
    tracing::info!(region = %region.label, "refreshing locations from overpass");

    let collected = collect_locations(client, region).await?;
    let skipped = collected.skipped;
    let locations = store.replace_all(collected.locations)?;

    tracing::info!(
        count = locations.len(),
        skipped,
        elapsed_ms = started.elapsed().as_millis(),
        "location refresh complete"
    );

    Ok(RefreshOutcome {
        count: locations.len(),
        skipped,
        locations,
    })
}
