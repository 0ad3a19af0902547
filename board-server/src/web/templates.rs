//! Askama templates for the web frontend.

use askama::Template;

use crate::board::BoardSnapshot;

use super::state::PopularStop;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the stop search form and map.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub popular_stops: Vec<PopularStopView>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Arrival table fragment for a rendered board.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub stop_id: String,
    pub rows: Vec<RowView>,
}

/// Error fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Popular stop shortcut view model.
#[derive(Debug, Clone)]
pub struct PopularStopView {
    pub id: String,
    pub name: String,
}

impl PopularStopView {
    pub fn from_stop(stop: &PopularStop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
        }
    }
}

/// Table row view model.
#[derive(Debug, Clone)]
pub struct RowView {
    pub bus_number: String,
    pub operator: String,
    pub eta: String,
}

impl BoardTemplate {
    /// Create from a board snapshot.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            stop_id: snapshot.stop.to_string(),
            rows: snapshot
                .rows
                .iter()
                .map(|row| RowView {
                    bus_number: row.bus_number.clone(),
                    operator: row.operator.clone(),
                    eta: row.eta_label.clone(),
                })
                .collect(),
        }
    }
}
