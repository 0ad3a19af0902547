//! Web layer for the arrival board.
//!
//! Provides the board page, a content-negotiated board endpoint and
//! static assets. The browser-side script is a thin rendering surface:
//! it only applies the marker and viewport commands computed here.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppState, PopularStop, default_popular_stops};
pub use templates::*;
