//! Domain types for the arrival board.
//!
//! This module contains the core domain model types that represent
//! validated transit data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod geo;
mod marker;
mod service;
mod stop;

pub use geo::{GeoPoint, InvalidPoint};
pub use marker::{MarkerEntity, MarkerKey};
pub use service::ServiceRecord;
pub use stop::{InvalidStopId, StopId};
