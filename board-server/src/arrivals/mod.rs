//! Arrival feed client.
//!
//! This module provides an HTTP client for the real-time bus arrival
//! feed, which answers "which services call at this stop, and when do
//! they next arrive?".
//!
//! Key characteristics of the feed:
//! - Fields are **sloppy**: numbers arrive as strings and vice versa,
//!   and absent data is sometimes omitted, sometimes null
//! - Coordinates are per-service and frequently missing; a record
//!   without both latitude and longitude is unlocated
//! - The response carries no stable identifiers beyond the bus number

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{ArrivalsClient, ArrivalsConfig};
pub use convert::convert_services;
pub use error::ArrivalsError;
pub use mock::MockArrivalSource;
pub use types::{ArrivalsResponse, RawService};
