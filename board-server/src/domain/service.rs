//! Bus service record.

use super::GeoPoint;

/// One bus service's current state at a stop.
///
/// `bus_number` is the stable identity key within one query result.
/// Two records with the same number but different operators are distinct
/// table rows. The upstream feed omits fields freely, so everything but
/// the number is optional in spirit: `operator` is empty when unknown
/// (the view layer renders it as "N/A"), and `eta_minutes`/`position`
/// are `None` when the feed had nothing usable.
///
/// Invariant, enforced at conversion time: `eta_minutes` is finite when
/// present.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    /// Route number as printed on the bus (e.g., "12", "2A").
    pub bus_number: String,

    /// Operating company name; empty when the feed omitted it.
    pub operator: String,

    /// Estimated minutes until the next arrival, if known.
    pub eta_minutes: Option<f64>,

    /// Live position of the approaching bus, if known.
    pub position: Option<GeoPoint>,
}

impl ServiceRecord {
    /// Create a record with no ETA and no position.
    pub fn new(bus_number: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            bus_number: bus_number.into(),
            operator: operator.into(),
            eta_minutes: None,
            position: None,
        }
    }

    /// Set the ETA in minutes.
    pub fn with_eta(mut self, minutes: f64) -> Self {
        self.eta_minutes = Some(minutes);
        self
    }

    /// Set the live position.
    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }
}
