use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Aggregate of everything the advisor knows about a city.
///
/// Produced in one piece by [`crate::WeatherService::city_data`]; a failure in
/// any of the three lookups (geocode, current weather, timezone) means no
/// value is constructed at all. Built fresh per request and discarded with
/// the response.
#[derive(Debug, Clone)]
pub struct CityData {
    /// City name as supplied by the caller, not the geocoder's canonical one.
    pub name: String,
    /// Country as supplied by the caller; used as a geocoding tie-breaker
    /// and a display convention key, never validated.
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier, e.g. "Europe/London".
    pub timezone: String,
    /// "Now" projected into the city's timezone at query time.
    pub local_time: DateTime<FixedOffset>,
    /// Human-readable weather description, translated from the WMO code.
    pub weather: String,
    pub temp_c: f64,
    pub temp_f: f64,
}

/// Deployment safety verdict for a city.
#[derive(Debug, Clone, Serialize)]
pub struct Safety {
    pub safe: bool,
    /// Explanation of the decisive rule.
    pub reason: String,
    pub weather: String,
    /// Temperature pre-formatted for display.
    pub temp: String,
}

/// Outcome of a (simulated) deployment.
#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    pub deployed: bool,
    pub message: String,
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}
