//! Marker set reconciliation.
//!
//! The reconciler is the single owner of the displayed marker set. Each
//! query cycle hands it a complete target set; it computes the minimal
//! create/update/remove delta and applies it, so the visual state always
//! matches the latest result with no orphaned or duplicate markers.
//!
//! An updated marker keeps its identity: the rendering surface moves the
//! existing visual object instead of destroying and recreating it, which
//! would flicker and drop any open popup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::{GeoPoint, MarkerEntity, MarkerKey, ServiceRecord, StopId};

/// The minimal difference between the previous and the new marker set.
///
/// Vectors are sorted by key, so equal inputs always produce an
/// identical delta.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerDelta {
    /// Markers that did not exist before this cycle.
    pub created: Vec<MarkerEntity>,

    /// Markers whose point or label changed; same identity, new attributes.
    pub updated: Vec<MarkerEntity>,

    /// Identities displayed before this cycle but absent from the target.
    pub removed: Vec<MarkerKey>,
}

impl MarkerDelta {
    /// True when the cycle changed nothing on the map.
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Owner of the currently-displayed marker set.
#[derive(Debug, Default)]
pub struct MarkerReconciler {
    current: HashMap<MarkerKey, MarkerEntity>,
}

impl MarkerReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the displayed set against a complete target set.
    ///
    /// Never fails: malformed points are filtered out upstream at
    /// conversion time. Duplicate keys in the target collapse, last
    /// entry winning.
    pub fn reconcile(&mut self, target: Vec<MarkerEntity>) -> MarkerDelta {
        let mut desired: HashMap<MarkerKey, MarkerEntity> = HashMap::with_capacity(target.len());
        for entity in target {
            desired.insert(entity.key.clone(), entity);
        }

        let mut delta = MarkerDelta::default();

        for key in self.current.keys() {
            if !desired.contains_key(key) {
                delta.removed.push(key.clone());
            }
        }
        for key in &delta.removed {
            self.current.remove(key);
        }

        for (key, entity) in desired {
            match self.current.entry(key) {
                Entry::Vacant(slot) => {
                    delta.created.push(entity.clone());
                    slot.insert(entity);
                }
                Entry::Occupied(mut slot) => {
                    // Attribute change: same visual object, new state.
                    if *slot.get() != entity {
                        delta.updated.push(entity.clone());
                        slot.insert(entity);
                    }
                }
            }
        }

        delta.created.sort_by(|a, b| a.key.cmp(&b.key));
        delta.updated.sort_by(|a, b| a.key.cmp(&b.key));
        delta.removed.sort();

        delta
    }

    /// The currently-displayed markers, sorted by key.
    pub fn snapshot(&self) -> Vec<MarkerEntity> {
        let mut markers: Vec<MarkerEntity> = self.current.values().cloned().collect();
        markers.sort_by(|a, b| a.key.cmp(&b.key));
        markers
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

/// Derive the complete marker target set for one query cycle.
///
/// The stop marker appears when the stop has a known location; each
/// located service contributes a bus marker. Unlocated services simply
/// do not appear on the map.
pub fn marker_targets(
    stop: &StopId,
    stop_location: Option<GeoPoint>,
    services: &[ServiceRecord],
) -> Vec<MarkerEntity> {
    let mut targets = Vec::with_capacity(services.len() + 1);

    if let Some(point) = stop_location {
        targets.push(MarkerEntity::new(
            MarkerKey::Stop,
            point,
            format!("Stop {stop}"),
        ));
    }

    for service in services {
        let Some(point) = service.position else {
            continue;
        };
        let label = if service.operator.is_empty() {
            format!("Bus {}", service.bus_number)
        } else {
            format!("Bus {} ({})", service.bus_number, service.operator)
        };
        targets.push(MarkerEntity::new(
            MarkerKey::Bus(service.bus_number.clone()),
            point,
            label,
        ));
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn stop_marker(lat: f64, lon: f64) -> MarkerEntity {
        MarkerEntity::new(MarkerKey::Stop, point(lat, lon), "Stop 83139")
    }

    fn bus_marker(number: &str, lat: f64, lon: f64) -> MarkerEntity {
        MarkerEntity::new(
            MarkerKey::Bus(number.to_string()),
            point(lat, lon),
            format!("Bus {number}"),
        )
    }

    #[test]
    fn creates_everything_from_empty() {
        let mut reconciler = MarkerReconciler::new();
        let delta = reconciler.reconcile(vec![stop_marker(1.0, 2.0), bus_marker("12", 3.0, 4.0)]);

        assert_eq!(delta.created.len(), 2);
        assert!(delta.updated.is_empty());
        assert!(delta.removed.is_empty());
        assert_eq!(reconciler.len(), 2);
    }

    #[test]
    fn removes_create_update_minimal_delta() {
        let mut reconciler = MarkerReconciler::new();
        reconciler.reconcile(vec![stop_marker(1.0, 2.0), bus_marker("12", 3.0, 4.0)]);

        // Next cycle: stop gone, bus 12 stays put, bus 5 appears.
        let delta = reconciler.reconcile(vec![bus_marker("12", 3.0, 4.0), bus_marker("5", 5.0, 6.0)]);

        assert_eq!(delta.removed, vec![MarkerKey::Stop]);
        assert_eq!(delta.created, vec![bus_marker("5", 5.0, 6.0)]);
        // Unchanged bus 12 is neither updated nor recreated.
        assert!(delta.updated.is_empty());
        assert_eq!(reconciler.len(), 2);
    }

    #[test]
    fn moved_marker_is_updated_not_recreated() {
        let mut reconciler = MarkerReconciler::new();
        reconciler.reconcile(vec![bus_marker("12", 3.0, 4.0)]);

        let delta = reconciler.reconcile(vec![bus_marker("12", 3.5, 4.5)]);

        assert!(delta.created.is_empty());
        assert!(delta.removed.is_empty());
        assert_eq!(delta.updated, vec![bus_marker("12", 3.5, 4.5)]);
    }

    #[test]
    fn label_change_alone_is_an_update() {
        let mut reconciler = MarkerReconciler::new();
        reconciler.reconcile(vec![bus_marker("12", 3.0, 4.0)]);

        let relabelled = MarkerEntity::new(MarkerKey::Bus("12".to_string()), point(3.0, 4.0), "Bus 12 (SMRT)");
        let delta = reconciler.reconcile(vec![relabelled.clone()]);

        assert_eq!(delta.updated, vec![relabelled]);
    }

    #[test]
    fn identical_target_is_a_noop() {
        let mut reconciler = MarkerReconciler::new();
        reconciler.reconcile(vec![stop_marker(1.0, 2.0), bus_marker("12", 3.0, 4.0)]);

        let delta = reconciler.reconcile(vec![stop_marker(1.0, 2.0), bus_marker("12", 3.0, 4.0)]);
        assert!(delta.is_empty());
    }

    #[test]
    fn empty_target_clears_the_set() {
        let mut reconciler = MarkerReconciler::new();
        reconciler.reconcile(vec![stop_marker(1.0, 2.0), bus_marker("12", 3.0, 4.0)]);

        let delta = reconciler.reconcile(vec![]);
        assert_eq!(delta.removed.len(), 2);
        assert!(reconciler.is_empty());
    }

    #[test]
    fn duplicate_target_keys_collapse_last_wins() {
        let mut reconciler = MarkerReconciler::new();
        let delta = reconciler.reconcile(vec![bus_marker("12", 1.0, 1.0), bus_marker("12", 9.0, 9.0)]);

        assert_eq!(delta.created, vec![bus_marker("12", 9.0, 9.0)]);
        assert_eq!(reconciler.len(), 1);
    }

    #[test]
    fn snapshot_is_sorted_by_key() {
        let mut reconciler = MarkerReconciler::new();
        reconciler.reconcile(vec![
            bus_marker("7", 1.0, 1.0),
            stop_marker(0.0, 0.0),
            bus_marker("12", 2.0, 2.0),
        ]);

        let keys: Vec<MarkerKey> = reconciler.snapshot().into_iter().map(|m| m.key).collect();
        assert_eq!(
            keys,
            vec![
                MarkerKey::Stop,
                MarkerKey::Bus("12".to_string()),
                MarkerKey::Bus("7".to_string()),
            ]
        );
    }

    #[test]
    fn targets_skip_unlocated_services() {
        let stop = StopId::parse("83139").unwrap();
        let services = vec![
            ServiceRecord::new("12", "SBS Transit").with_position(point(1.0, 2.0)),
            ServiceRecord::new("7", "SMRT"), // no position
        ];

        let targets = marker_targets(&stop, None, &services);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].key, MarkerKey::Bus("12".to_string()));
        assert_eq!(targets[0].label, "Bus 12 (SBS Transit)");
    }

    #[test]
    fn targets_include_stop_when_located() {
        let stop = StopId::parse("83139").unwrap();
        let targets = marker_targets(&stop, Some(point(1.35, 103.8)), &[]);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].key, MarkerKey::Stop);
        assert_eq!(targets[0].label, "Stop 83139");
    }

    #[test]
    fn targets_label_without_operator() {
        let stop = StopId::parse("83139").unwrap();
        let services = vec![ServiceRecord::new("12", "").with_position(point(1.0, 2.0))];

        let targets = marker_targets(&stop, None, &services);
        assert_eq!(targets[0].label, "Bus 12");
    }
}
