//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::board::{BoardSnapshot, MarkerDelta, ViewportCommand};
use crate::domain::{GeoPoint, MarkerEntity};

/// Request to render the board for a stop.
#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    /// Raw stop identifier as typed by the rider.
    pub id: String,
}

/// One row of the arrival table.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRowDto {
    pub bus_number: String,
    pub operator: String,
    pub eta: String,
}

/// A geographic point on the wire.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointDto {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeoPoint> for PointDto {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
        }
    }
}

/// One map marker.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerDto {
    /// Marker identity ("stop" or "bus:<number>").
    pub key: String,
    pub point: PointDto,
    pub label: String,
}

impl From<&MarkerEntity> for MarkerDto {
    fn from(entity: &MarkerEntity) -> Self {
        Self {
            key: entity.key.to_string(),
            point: entity.point.into(),
            label: entity.label.clone(),
        }
    }
}

/// The marker changes of one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct DeltaDto {
    pub created: Vec<MarkerDto>,
    pub updated: Vec<MarkerDto>,
    pub removed: Vec<String>,
}

impl From<&MarkerDelta> for DeltaDto {
    fn from(delta: &MarkerDelta) -> Self {
        Self {
            created: delta.created.iter().map(MarkerDto::from).collect(),
            updated: delta.updated.iter().map(MarkerDto::from).collect(),
            removed: delta.removed.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Camera instruction for the map surface.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewportDto {
    /// Fit the view to the region; a degenerate region (single point)
    /// should be shown at a sane default zoom.
    FitBounds {
        min: PointDto,
        max: PointDto,
        degenerate: bool,
    },

    /// Keep the current view.
    HoldView,
}

impl From<ViewportCommand> for ViewportDto {
    fn from(command: ViewportCommand) -> Self {
        match command {
            ViewportCommand::FitBounds(bounds) => ViewportDto::FitBounds {
                min: PointDto {
                    latitude: bounds.min_latitude,
                    longitude: bounds.min_longitude,
                },
                max: PointDto {
                    latitude: bounds.max_latitude,
                    longitude: bounds.max_longitude,
                },
                degenerate: bounds.is_degenerate(),
            },
            ViewportCommand::HoldView => ViewportDto::HoldView,
        }
    }
}

/// JSON body for a rendered board.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub stop_id: String,
    pub generated_at: String,
    pub services: Vec<ServiceRowDto>,
    pub stop_location: Option<PointDto>,
    pub markers: Vec<MarkerDto>,
    pub delta: DeltaDto,
    pub viewport: ViewportDto,
}

impl BoardResponse {
    /// Build the wire form of a snapshot.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            stop_id: snapshot.stop.to_string(),
            generated_at: snapshot.generated_at.to_rfc3339(),
            services: snapshot
                .rows
                .iter()
                .map(|row| ServiceRowDto {
                    bus_number: row.bus_number.clone(),
                    operator: row.operator.clone(),
                    eta: row.eta_label.clone(),
                })
                .collect(),
            stop_location: snapshot.stop_location.map(PointDto::from),
            markers: snapshot.markers.iter().map(MarkerDto::from).collect(),
            delta: DeltaDto::from(&snapshot.delta),
            viewport: snapshot.viewport.into(),
        }
    }
}

/// JSON body for an error.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
