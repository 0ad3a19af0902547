//! Query-cycle orchestration.
//!
//! One submit runs the whole cycle: validate the stop identifier, issue
//! the stop-location and arrival fetches concurrently, order and format
//! the services, reconcile the marker set and fit the viewport. The
//! product is an immutable [`BoardSnapshot`]; table rows and markers
//! always come from the same cycle.
//!
//! Overlapping submits follow last-submitted-wins: every submit bumps a
//! cycle counter, and a cycle re-checks the counter after its fetches
//! settle. The transport offers no hard cancellation, so a superseded
//! cycle simply discards its results (and even its errors) on arrival.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::{GeoPoint, InvalidStopId, MarkerEntity, ServiceRecord, StopId};

use super::format::format_eta;
use super::markers::{MarkerDelta, MarkerReconciler, marker_targets};
use super::ordering::order_services;
use super::viewport::{ViewportCommand, fit_viewport};

/// Network or decode failure reported by a data source.
///
/// Client crates carry richer error types; this is the reduced form
/// that crosses the source traits into the controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Source of real-time arrival data for a stop.
pub trait ArrivalSource {
    /// Fetch the current service records for a stop.
    ///
    /// An empty list is a valid response ("no services right now");
    /// the controller distinguishes it from a transport failure.
    fn fetch_arrivals(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Vec<ServiceRecord>, TransportError>> + Send;
}

/// Source of a stop's geographic location.
pub trait StopLocationSource {
    /// Look up where a stop is, if the source knows it.
    fn locate_stop(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<Option<GeoPoint>, TransportError>> + Send;
}

/// Errors that terminate a query cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The submitted identifier is not a valid stop ID. Raised before
    /// any network call.
    #[error("{0}")]
    Validation(#[from] InvalidStopId),

    /// The arrival fetch succeeded but returned zero services.
    #[error("no arrival data found for stop {stop}")]
    NoArrivals { stop: StopId },

    /// The arrival fetch itself failed.
    #[error("failed to fetch arrival data: {message}")]
    Transport { message: String },
}

/// One formatted table row: bus number, operator, ETA label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRow {
    pub bus_number: String,
    pub operator: String,
    pub eta_label: String,
}

impl ServiceRow {
    fn from_record(record: &ServiceRecord) -> Self {
        let operator = if record.operator.is_empty() {
            "N/A".to_string()
        } else {
            record.operator.clone()
        };
        Self {
            bus_number: record.bus_number.clone(),
            operator,
            eta_label: format_eta(record.eta_minutes),
        }
    }
}

/// The immutable product of one completed query cycle.
///
/// A new cycle fully supersedes the previous snapshot; there is no
/// partial merge across cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    /// The stop that was queried.
    pub stop: StopId,

    /// When this snapshot was produced.
    pub generated_at: DateTime<Utc>,

    /// Services in board order.
    pub services: Vec<ServiceRecord>,

    /// Formatted table rows, aligned with `services`.
    pub rows: Vec<ServiceRow>,

    /// The stop's location, when the location source knew it.
    pub stop_location: Option<GeoPoint>,

    /// The complete reconciled marker set, sorted by key.
    pub markers: Vec<MarkerEntity>,

    /// What changed on the map this cycle.
    pub delta: MarkerDelta,

    /// Camera instruction for the map.
    pub viewport: ViewportCommand,
}

/// How a cycle ended, short of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The cycle completed and its snapshot is current.
    Rendered(BoardSnapshot),

    /// A newer submit overtook this cycle; its results were discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct CycleState {
    cycle: u64,
    markers: MarkerReconciler,
}

/// Orchestrates query cycles against the two data sources.
///
/// The marker set is the only mutable shared state; it lives behind a
/// mutex that is held only across the synchronous processing section,
/// never across an await point.
pub struct BoardController<A, S> {
    arrivals: A,
    stops: S,
    state: Mutex<CycleState>,
}

impl<A: ArrivalSource, S: StopLocationSource> BoardController<A, S> {
    pub fn new(arrivals: A, stops: S) -> Self {
        Self {
            arrivals,
            stops,
            state: Mutex::new(CycleState::default()),
        }
    }

    /// Run one query cycle for raw user input.
    ///
    /// Returns `Ok(Rendered(_))` with the new snapshot,
    /// `Ok(Superseded)` when a newer submit overtook this one, or a
    /// [`BoardError`] that the surface shows in its message area.
    pub async fn submit(&self, raw_input: &str) -> Result<CycleOutcome, BoardError> {
        // Allocate the cycle number before validating: any submit,
        // valid or not, supersedes whatever is still in flight.
        let cycle = {
            let mut state = self.lock_state();
            state.cycle += 1;
            state.cycle
        };

        let stop = StopId::parse(raw_input)?;
        debug!(%stop, cycle, "query cycle started");

        let (location, arrivals) = tokio::join!(
            self.stops.locate_stop(&stop),
            self.arrivals.fetch_arrivals(&stop),
        );

        let mut state = self.lock_state();
        if state.cycle != cycle {
            debug!(%stop, cycle, "cycle superseded, discarding results");
            return Ok(CycleOutcome::Superseded);
        }

        let services = arrivals.map_err(|e| BoardError::Transport {
            message: e.to_string(),
        })?;
        if services.is_empty() {
            return Err(BoardError::NoArrivals { stop });
        }

        // A missing stop location degrades to "no stop marker": the
        // board's primary purpose is arrival data.
        let stop_location = match location {
            Ok(location) => location,
            Err(e) => {
                warn!(%stop, error = %e, "stop location unavailable, rendering without stop marker");
                None
            }
        };

        let services = order_services(&services);
        let rows = services.iter().map(ServiceRow::from_record).collect();
        let delta = state
            .markers
            .reconcile(marker_targets(&stop, stop_location, &services));
        let markers = state.markers.snapshot();
        let points: Vec<GeoPoint> = markers.iter().map(|m| m.point).collect();
        let viewport = fit_viewport(&points);

        debug!(
            %stop,
            cycle,
            services = services.len(),
            markers = markers.len(),
            "query cycle rendered"
        );

        Ok(CycleOutcome::Rendered(BoardSnapshot {
            stop,
            generated_at: Utc::now(),
            services,
            rows,
            stop_location,
            markers,
            delta,
            viewport,
        }))
    }

    fn lock_state(&self) -> MutexGuard<'_, CycleState> {
        // The lock is never held across an await or a panic-prone
        // section; recover the data if it was ever poisoned anyway.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
