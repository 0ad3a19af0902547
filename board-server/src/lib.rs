//! Live bus arrival board server.
//!
//! A web application that answers: "which buses are about to arrive at
//! this stop, and where are they right now?"

pub mod arrivals;
pub mod board;
pub mod domain;
pub mod stops;
pub mod web;
