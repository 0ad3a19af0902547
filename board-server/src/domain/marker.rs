//! Map marker identity and entity types.

use std::fmt;

use super::GeoPoint;

/// Identity of a marker on the map.
///
/// At most one stop marker exists at a time; bus markers are keyed by
/// bus number, so services sharing a number collapse to one marker.
///
/// The derived ordering (stop first, then buses by number) gives
/// reconciliation deltas a deterministic presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKey {
    /// The queried stop itself.
    Stop,
    /// An approaching bus, identified by its route number.
    Bus(String),
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKey::Stop => f.write_str("stop"),
            MarkerKey::Bus(number) => write!(f, "bus:{number}"),
        }
    }
}

/// A single point displayed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEntity {
    /// Marker identity; stable across query cycles.
    pub key: MarkerKey,

    /// Where the marker sits.
    pub point: GeoPoint,

    /// Popup text (bus number and operator, or the stop caption).
    pub label: String,
}

impl MarkerEntity {
    pub fn new(key: MarkerKey, point: GeoPoint, label: impl Into<String>) -> Self {
        Self {
            key,
            point,
            label: label.into(),
        }
    }
}
