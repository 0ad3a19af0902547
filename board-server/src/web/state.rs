//! Application state for the web layer.

use std::sync::Arc;

use crate::board::{ArrivalSource, BoardController, StopLocationSource};

/// A preset stop shortcut shown on the index page.
///
/// Shortcuts program the input field and trigger the same query cycle
/// as a hand-typed identifier.
#[derive(Debug, Clone)]
pub struct PopularStop {
    pub id: &'static str,
    pub name: &'static str,
}

/// The default set of popular stop shortcuts.
pub fn default_popular_stops() -> Vec<PopularStop> {
    vec![
        PopularStop {
            id: "83139",
            name: "Serangoon Rd",
        },
        PopularStop {
            id: "01012",
            name: "Victoria St",
        },
        PopularStop {
            id: "09047",
            name: "Orchard Stn",
        },
        PopularStop {
            id: "75009",
            name: "Pasir Ris Int",
        },
    ]
}

/// Shared application state.
///
/// Contains the controller (and through it the marker state) plus the
/// configured stop shortcuts.
pub struct AppState<A, S> {
    /// Query-cycle controller, shared across requests.
    pub controller: Arc<BoardController<A, S>>,

    /// Preset stop shortcuts for the index page.
    pub popular_stops: Arc<Vec<PopularStop>>,
}

// Derived Clone would require A: Clone + S: Clone; both fields are
// shared handles, so clone them directly.
impl<A, S> Clone for AppState<A, S> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            popular_stops: Arc::clone(&self.popular_stops),
        }
    }
}

impl<A: ArrivalSource, S: StopLocationSource> AppState<A, S> {
    /// Create a new app state.
    pub fn new(controller: BoardController<A, S>, popular_stops: Vec<PopularStop>) -> Self {
        Self {
            controller: Arc::new(controller),
            popular_stops: Arc::new(popular_stops),
        }
    }
}
