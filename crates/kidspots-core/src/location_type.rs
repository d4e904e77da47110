//! The closed set of place categories shown on the map, and the static
//! registry that ties each one to its OSM tag predicate and display style.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::location::Tags;
use crate::CoreError;

/// A kid-friendly place category.
///
/// Variant order is classification priority: when an element carries tags
/// for more than one category, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Playground,
    Park,
    Museum,
    ScienceCenter,
    Planetarium,
}

/// Static attributes for one [`LocationType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationTypeConfig {
    pub location_type: LocationType,
    /// OSM tag key the predicate tests, e.g. `leisure`.
    pub tag_key: &'static str,
    /// Required value for [`Self::tag_key`], e.g. `playground`.
    pub tag_value: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    /// Plural display label, e.g. `Playgrounds`.
    pub label: &'static str,
}

/// The type registry, in classification priority order.
pub static LOCATION_TYPES: [LocationTypeConfig; 5] = [
    LocationTypeConfig {
        location_type: LocationType::Playground,
        tag_key: "leisure",
        tag_value: "playground",
        color: "#E91E63",
        icon: "fas fa-child",
        label: "Playgrounds",
    },
    LocationTypeConfig {
        location_type: LocationType::Park,
        tag_key: "leisure",
        tag_value: "park",
        color: "#4CAF50",
        icon: "fas fa-tree",
        label: "Parks",
    },
    LocationTypeConfig {
        location_type: LocationType::Museum,
        tag_key: "tourism",
        tag_value: "museum",
        color: "#9C27B0",
        icon: "fas fa-university",
        label: "Museums",
    },
    LocationTypeConfig {
        location_type: LocationType::ScienceCenter,
        tag_key: "amenity",
        tag_value: "science_center",
        color: "#F44336",
        icon: "fas fa-flask",
        label: "Science Centers",
    },
    LocationTypeConfig {
        location_type: LocationType::Planetarium,
        tag_key: "amenity",
        tag_value: "planetarium",
        color: "#3F51B5",
        icon: "fas fa-globe",
        label: "Planetariums",
    },
];

impl LocationType {
    /// Returns the wire name, e.g. `science_center`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Playground => "playground",
            LocationType::Park => "park",
            LocationType::Museum => "museum",
            LocationType::ScienceCenter => "science_center",
            LocationType::Planetarium => "planetarium",
        }
    }

    /// Returns this type's registry entry.
    #[must_use]
    pub fn config(self) -> &'static LocationTypeConfig {
        // Registry order matches variant order.
        &LOCATION_TYPES[self as usize]
    }

    /// Classifies a tag set, returning the first registry type whose
    /// predicate matches.
    #[must_use]
    pub fn classify(tags: &Tags) -> Option<Self> {
        LOCATION_TYPES
            .iter()
            .find(|config| config.matches(tags))
            .map(|config| config.location_type)
    }
}

impl LocationTypeConfig {
    /// Renders the predicate as `key=value` for Overpass QL filters.
    #[must_use]
    pub fn predicate(&self) -> String {
        format!("{}={}", self.tag_key, self.tag_value)
    }

    #[must_use]
    pub fn matches(&self, tags: &Tags) -> bool {
        tags.get(self.tag_key).map(String::as_str) == Some(self.tag_value)
    }

    /// Singular form of the display label, used as a fallback place name.
    ///
    /// Strips the trailing plural `s`: `Parks` becomes `Park`.
    #[must_use]
    pub fn singular_label(&self) -> &'static str {
        self.label.strip_suffix('s').unwrap_or(self.label)
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LOCATION_TYPES
            .iter()
            .map(|config| config.location_type)
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::InvalidLocationType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn registry_order_matches_variant_order() {
        for (idx, config) in LOCATION_TYPES.iter().enumerate() {
            assert_eq!(config.location_type as usize, idx);
            assert_eq!(config.location_type.config(), config);
        }
    }

    #[test]
    fn from_str_accepts_every_registered_type() {
        for config in &LOCATION_TYPES {
            let parsed: LocationType = config.location_type.as_str().parse().unwrap();
            assert_eq!(parsed, config.location_type);
        }
    }

    #[test]
    fn from_str_rejects_unknown_type() {
        let err = "zoo".parse::<LocationType>().unwrap_err();
        assert_eq!(err, CoreError::InvalidLocationType("zoo".to_string()));
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&LocationType::ScienceCenter).unwrap();
        assert_eq!(json, "\"science_center\"");
        let back: LocationType = serde_json::from_str("\"planetarium\"").unwrap();
        assert_eq!(back, LocationType::Planetarium);
    }

    #[test]
    fn predicate_renders_key_equals_value() {
        assert_eq!(
            LocationType::Museum.config().predicate(),
            "tourism=museum"
        );
        assert_eq!(
            LocationType::ScienceCenter.config().predicate(),
            "amenity=science_center"
        );
    }

    #[test]
    fn singular_label_strips_trailing_s() {
        assert_eq!(LocationType::Park.config().singular_label(), "Park");
        assert_eq!(
            LocationType::ScienceCenter.config().singular_label(),
            "Science Center"
        );
        assert_eq!(LocationType::Museum.config().singular_label(), "Museum");
    }

    #[test]
    fn classify_returns_none_without_matching_tags() {
        assert_eq!(LocationType::classify(&tags(&[("shop", "toys")])), None);
        assert_eq!(LocationType::classify(&tags(&[("leisure", "pitch")])), None);
        assert_eq!(LocationType::classify(&Tags::new()), None);
    }

    #[test]
    fn classify_first_match_wins() {
        let t = tags(&[("leisure", "park"), ("tourism", "museum")]);
        assert_eq!(LocationType::classify(&t), Some(LocationType::Park));

        let t = tags(&[("amenity", "planetarium"), ("tourism", "museum")]);
        assert_eq!(LocationType::classify(&t), Some(LocationType::Museum));
    }
}
