//! The arrival board engine.
//!
//! This module turns two independently-fetched, partially-incomplete
//! payloads (arrivals and stop location) into a single consistent board
//! state: deterministically ordered services, formatted ETAs, a
//! reconciled marker set and a viewport command. The controller drives
//! one query cycle end to end and enforces last-submitted-wins across
//! overlapping cycles.

mod controller;
mod format;
mod markers;
mod ordering;
mod viewport;

pub use controller::{
    ArrivalSource, BoardController, BoardError, BoardSnapshot, CycleOutcome, ServiceRow,
    StopLocationSource, TransportError,
};
pub use format::format_eta;
pub use markers::{MarkerDelta, MarkerReconciler, marker_targets};
pub use ordering::{natural_cmp, order_services};
pub use viewport::{BoundingBox, ViewportCommand, fit_viewport};
