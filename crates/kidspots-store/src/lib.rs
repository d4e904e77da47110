//! In-memory storage for normalized locations.
//!
//! The collection lives for the lifetime of the process. Every mutation runs
//! under a single write guard, so concurrent readers observe either the
//! collection before a [`LocationStore::replace_all`] or the one after it,
//! never a partially refilled one.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use kidspots_core::{Location, LocationType, NewLocation, LOCATION_TYPES};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock; the collection may be
    /// half-written and is no longer trusted.
    #[error("location store lock poisoned")]
    Poisoned,
}

#[derive(Debug)]
struct StoreState {
    locations: BTreeMap<i64, Location>,
    next_id: i64,
    refreshed_at: Option<DateTime<Utc>>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            locations: BTreeMap::new(),
            next_id: 1,
            refreshed_at: None,
        }
    }

    fn insert(&mut self, new: NewLocation) -> Location {
        let id = self.next_id;
        self.next_id += 1;
        let location = new.into_location(id);
        self.locations.insert(id, location.clone());
        location
    }

    fn clear(&mut self) {
        self.locations.clear();
        self.next_id = 1;
    }
}

/// Process-wide collection of [`Location`]s, keyed by store-assigned id.
#[derive(Debug)]
pub struct LocationStore {
    state: RwLock<StoreState>,
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StoreError> {
        self.state.write().map_err(|_| StoreError::Poisoned)
    }

    /// Returns a snapshot of every stored location in id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn list_locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.read()?.locations.values().cloned().collect())
    }

    /// Returns the stored locations whose type equals `location_type`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn list_locations_by_type(
        &self,
        location_type: LocationType,
    ) -> Result<Vec<Location>, StoreError> {
        Ok(self
            .read()?
            .locations
            .values()
            .filter(|l| l.location_type == location_type)
            .cloned()
            .collect())
    }

    /// Finds a location by its `{type}/{id}` OSM identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn get_location_by_osm_id(&self, osm_id: &str) -> Result<Option<Location>, StoreError> {
        Ok(self
            .read()?
            .locations
            .values()
            .find(|l| l.osm_id.as_deref() == Some(osm_id))
            .cloned())
    }

    /// Number of stored locations per registered type, zero counts included.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn count_by_type(&self) -> Result<BTreeMap<LocationType, usize>, StoreError> {
        let mut counts: BTreeMap<LocationType, usize> = LOCATION_TYPES
            .iter()
            .map(|config| (config.location_type, 0))
            .collect();
        for location in self.read()?.locations.values() {
            *counts.entry(location.location_type).or_default() += 1;
        }
        Ok(counts)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.locations.len())
    }

    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.locations.is_empty())
    }

    /// When [`Self::replace_all`] last completed, if ever.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn last_refreshed_at(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.read()?.refreshed_at)
    }

    /// Appends one location with the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn insert_location(&self, new: NewLocation) -> Result<Location, StoreError> {
        Ok(self.write()?.insert(new))
    }

    /// Appends a batch, continuing the id sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn insert_locations(&self, batch: Vec<NewLocation>) -> Result<Vec<Location>, StoreError> {
        let mut state = self.write()?;
        Ok(batch.into_iter().map(|new| state.insert(new)).collect())
    }

    /// Removes every location and restarts ids at 1.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.write()?.clear();
        Ok(())
    }

    /// Replaces the whole collection with `batch`, assigning ids `1..=n` in
    /// batch order. Returns the stored records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn replace_all(&self, batch: Vec<NewLocation>) -> Result<Vec<Location>, StoreError> {
        let mut state = self.write()?;
        let previous = state.locations.len();
        state.clear();
        let stored: Vec<Location> = batch.into_iter().map(|new| state.insert(new)).collect();
        state.refreshed_at = Some(Utc::now());
        drop(state);

        tracing::info!(previous, stored = stored.len(), "location store replaced");
        Ok(stored)
    }
}
