//! Conversion from raw feed DTOs to domain service records.
//!
//! All missing-data policy for the arrival feed lives here, so the
//! rest of the system only ever sees validated records: ETAs are
//! finite when present, positions are real points, and every record
//! has a bus number to serve as its identity.

use tracing::warn;

use crate::domain::{GeoPoint, ServiceRecord};

use super::types::{ArrivalsResponse, RawService};

/// Convert a feed response into domain records.
///
/// Infallible by design: a record the feed mangled is dropped or
/// partially blanked, with a data-quality warning, rather than
/// failing the cycle.
pub fn convert_services(response: ArrivalsResponse) -> Vec<ServiceRecord> {
    response
        .services
        .unwrap_or_default()
        .into_iter()
        .filter_map(convert_service)
        .collect()
}

fn convert_service(raw: RawService) -> Option<ServiceRecord> {
    // The bus number is the record's identity: without one there is
    // nothing to key a row or marker on.
    let Some(bus_number) = raw.bus_no.filter(|n| !n.trim().is_empty()) else {
        warn!("dropping arrival record without a bus number");
        return None;
    };

    let eta_minutes = match raw.next_bus_mins {
        Some(mins) if !mins.is_finite() => {
            warn!(bus = %bus_number, "discarding non-finite ETA");
            None
        }
        other => other,
    };

    let position = convert_position(&bus_number, raw.next_bus_lat, raw.next_bus_lon);

    Some(ServiceRecord {
        bus_number,
        operator: raw.operator.unwrap_or_default(),
        eta_minutes,
        position,
    })
}

fn convert_position(bus: &str, lat: Option<f64>, lon: Option<f64>) -> Option<GeoPoint> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => match GeoPoint::new(lat, lon) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!(bus = %bus, error = %e, "discarding malformed bus position");
                None
            }
        },
        (None, None) => None,
        // One coordinate without the other is never "located".
        _ => {
            warn!(bus = %bus, "discarding partial bus position");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::types::RawService;

    fn raw(bus_no: Option<&str>) -> RawService {
        RawService {
            bus_no: bus_no.map(str::to_string),
            ..RawService::default()
        }
    }

    fn response(services: Vec<RawService>) -> ArrivalsResponse {
        ArrivalsResponse {
            services: Some(services),
        }
    }

    #[test]
    fn converts_complete_record() {
        let records = convert_services(response(vec![RawService {
            bus_no: Some("12".to_string()),
            operator: Some("SBS Transit".to_string()),
            next_bus_mins: Some(4.0),
            next_bus_lat: Some(1.3521),
            next_bus_lon: Some(103.8198),
        }]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bus_number, "12");
        assert_eq!(records[0].operator, "SBS Transit");
        assert_eq!(records[0].eta_minutes, Some(4.0));
        assert!(records[0].position.is_some());
    }

    #[test]
    fn absent_services_is_empty() {
        let records = convert_services(ArrivalsResponse { services: None });
        assert!(records.is_empty());
    }

    #[test]
    fn record_without_bus_number_is_dropped() {
        let records = convert_services(response(vec![raw(None), raw(Some("12"))]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bus_number, "12");
    }

    #[test]
    fn blank_bus_number_is_dropped() {
        let records = convert_services(response(vec![raw(Some("  "))]));
        assert!(records.is_empty());
    }

    #[test]
    fn missing_operator_becomes_empty() {
        let records = convert_services(response(vec![raw(Some("12"))]));
        assert_eq!(records[0].operator, "");
    }

    #[test]
    fn partial_coordinates_are_unlocated() {
        let records = convert_services(response(vec![RawService {
            bus_no: Some("12".to_string()),
            next_bus_lat: Some(1.35),
            ..RawService::default()
        }]));

        assert_eq!(records[0].position, None);
    }

    #[test]
    fn non_finite_eta_is_absent() {
        let records = convert_services(response(vec![RawService {
            bus_no: Some("12".to_string()),
            next_bus_mins: Some(f64::NAN),
            ..RawService::default()
        }]));

        assert_eq!(records[0].eta_minutes, None);
    }

    #[test]
    fn non_finite_coordinates_are_unlocated() {
        let records = convert_services(response(vec![RawService {
            bus_no: Some("12".to_string()),
            next_bus_lat: Some(f64::INFINITY),
            next_bus_lon: Some(103.9),
            ..RawService::default()
        }]));

        assert_eq!(records[0].position, None);
    }

    #[test]
    fn duplicate_bus_numbers_stay_distinct_rows() {
        let records = convert_services(response(vec![
            RawService {
                bus_no: Some("12".to_string()),
                operator: Some("First".to_string()),
                ..RawService::default()
            },
            RawService {
                bus_no: Some("12".to_string()),
                operator: Some("Second".to_string()),
                ..RawService::default()
            },
        ]));

        assert_eq!(records.len(), 2);
    }
}
