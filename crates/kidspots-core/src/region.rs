use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A latitude/longitude rectangle in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl BoundingBox {
    /// Builds a bounding box after checking the edges are ordered and in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBoundingBox`] if any edge is not finite,
    /// out of range, or `south >= north` / `west >= east`.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, CoreError> {
        let edges = [south, west, north, east];
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(CoreError::InvalidBoundingBox(
                "edges must be finite numbers".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
            return Err(CoreError::InvalidBoundingBox(format!(
                "latitude out of range: south={south}, north={north}"
            )));
        }
        if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
            return Err(CoreError::InvalidBoundingBox(format!(
                "longitude out of range: west={west}, east={east}"
            )));
        }
        if south >= north || west >= east {
            return Err(CoreError::InvalidBoundingBox(format!(
                "expected south < north and west < east, got {south},{west},{north},{east}"
            )));
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    #[must_use]
    pub fn south(&self) -> f64 {
        self.south
    }

    #[must_use]
    pub fn west(&self) -> f64 {
        self.west
    }

    #[must_use]
    pub fn north(&self) -> f64 {
        self.north
    }

    #[must_use]
    pub fn east(&self) -> f64 {
        self.east
    }
}

/// Formats as Overpass expects: `south,west,north,east`.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

/// Parses `south,west,north,east`.
impl FromStr for BoundingBox {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let edges = s
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|e| {
                    CoreError::InvalidBoundingBox(format!("'{}': {e}", part.trim()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match edges.as_slice() {
            [south, west, north, east] => Self::new(*south, *west, *north, *east),
            _ => Err(CoreError::InvalidBoundingBox(format!(
                "expected 4 comma-separated values, got {}",
                edges.len()
            ))),
        }
    }
}

/// The metropolitan area the map covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Human-readable area name, also used as the fallback address for
    /// places whose tags carry no address parts.
    pub label: String,
    pub bounds: BoundingBox,
}

impl Region {
    #[must_use]
    pub fn san_francisco() -> Self {
        Self {
            label: "San Francisco, CA".to_string(),
            bounds: BoundingBox {
                south: 37.7049,
                west: -122.5161,
                north: 37.8199,
                east: -122.3555,
            },
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::san_francisco()
    }
}
