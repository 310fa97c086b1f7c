use crate::{
    error::WeatherError,
    model::CityData,
};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Timelike};
use std::fmt::Debug;

pub mod openmeteo;

/// Descriptions that count as deployable weather. Exact matches only.
const CLEAR_CONDITIONS: [&str; 4] = ["Clear", "Mainly clear", "Clear sky", "Sunny"];

/// City-data resolution plus the business rules derived from it.
///
/// The resolution step is the only one touching the network; the rule
/// methods are pure and shared by every implementation, so a test double
/// only has to supply `city_data`.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// Resolve all the data the advisor needs about a city, or fail.
    async fn city_data(&self, city: &str, country: &str) -> Result<CityData, WeatherError>;

    /// True only for an exact clear/sunny description, never a substring.
    fn is_clear_or_sunny(&self, weather: &str) -> bool {
        CLEAR_CONDITIONS.contains(&weather)
    }

    /// True when the local hour falls in the 9:00-17:00 window.
    fn is_business_hours(&self, local_time: &DateTime<FixedOffset>) -> bool {
        let hour = local_time.hour();
        (9..17).contains(&hour)
    }

    /// Format the temperature for display, by country convention: the United
    /// States reads Fahrenheit, everyone else Celsius.
    fn format_temperature(&self, city: &CityData) -> String {
        if city.country == "United States" || city.country == "USA" {
            format!("{:.1}°F", city.temp_f)
        } else {
            format!("{:.1}°C", city.temp_c)
        }
    }
}
