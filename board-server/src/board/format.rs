//! ETA display formatting.

/// Format an optional ETA in minutes for the arrival table.
///
/// Total: every input maps to a label. An absent or non-finite value
/// renders as "N/A", anything at or below zero as "Arrived", and a
/// positive value as whole minutes (rounded to nearest).
pub fn format_eta(eta_minutes: Option<f64>) -> String {
    match eta_minutes {
        None => "N/A".to_string(),
        Some(mins) if !mins.is_finite() => "N/A".to_string(),
        Some(mins) if mins <= 0.0 => "Arrived".to_string(),
        Some(mins) => format!("{} min", mins.round() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_na() {
        assert_eq!(format_eta(None), "N/A");
    }

    #[test]
    fn non_finite_is_na() {
        assert_eq!(format_eta(Some(f64::NAN)), "N/A");
        assert_eq!(format_eta(Some(f64::INFINITY)), "N/A");
    }

    #[test]
    fn zero_and_negative_are_arrived() {
        assert_eq!(format_eta(Some(0.0)), "Arrived");
        assert_eq!(format_eta(Some(-1.0)), "Arrived");
        assert_eq!(format_eta(Some(-7.5)), "Arrived");
    }

    #[test]
    fn positive_renders_whole_minutes() {
        assert_eq!(format_eta(Some(7.0)), "7 min");
        assert_eq!(format_eta(Some(1.0)), "1 min");
        assert_eq!(format_eta(Some(12.6)), "13 min");
    }

    #[test]
    fn small_positive_rounds_down_to_zero_minutes() {
        // Still "on the way": only values at or below zero read as
        // arrived.
        assert_eq!(format_eta(Some(0.3)), "0 min");
    }
}
