//! Arrival feed response DTOs.
//!
//! These types map directly to the feed's JSON responses. Every field
//! deserializes leniently: the feed sends numbers as strings and
//! strings as numbers depending on the upstream's mood, and a field
//! that cannot be read maps to "absent" rather than failing the whole
//! response.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response from `GET /arrivals?id=<stopId>`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalsResponse {
    /// Services currently calling at the stop. Absent and empty are
    /// both "no services".
    #[serde(default)]
    pub services: Option<Vec<RawService>>,
}

/// One service entry as the feed sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawService {
    /// Route number (e.g., "12", "2A"). Sometimes a bare number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub bus_no: Option<String>,

    /// Operating company name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub operator: Option<String>,

    /// Minutes until the next arrival. Sometimes a quoted number.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub next_bus_mins: Option<f64>,

    /// Latitude of the approaching bus.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub next_bus_lat: Option<f64>,

    /// Longitude of the approaching bus.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub next_bus_lon: Option<f64>,
}

/// Accept a string or a number; anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept a number or a numeric string; anything else is absent.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
