//! Stop location lookup client.
//!
//! Resolves a stop identifier to its geographic location, used only to
//! place the stop marker on the map. The board degrades gracefully
//! when this source fails, so everything here is best-effort.

mod client;
mod error;

pub use client::{StopLocationClient, StopsConfig};
pub use error::StopsError;
