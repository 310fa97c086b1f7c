//! Shared test doubles for dispatch and server-loop tests.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use deploy_core::{CityData, WeatherError, WeatherService};

/// Canned [`WeatherService`] so tests never touch the network.
#[derive(Debug)]
pub enum StubWeather {
    /// Every lookup resolves to this city.
    City(CityData),
    /// Every lookup fails as if the geocoder had no candidates.
    NotFound,
}

#[async_trait]
impl WeatherService for StubWeather {
    async fn city_data(&self, city: &str, country: &str) -> Result<CityData, WeatherError> {
        match self {
            StubWeather::City(data) => Ok(data.clone()),
            StubWeather::NotFound => Err(WeatherError::CityNotFound {
                city: city.to_owned(),
                country: country.to_owned(),
            }),
        }
    }
}

/// London fixture pinned to a given local time and weather.
pub fn london_at(hour: u32, minute: u32, weather: &str) -> CityData {
    let local_time: DateTime<FixedOffset> = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 6, 1, hour, minute, 0)
        .unwrap();

    CityData {
        name: "London".to_owned(),
        country: "United Kingdom".to_owned(),
        latitude: 51.50853,
        longitude: -0.12574,
        timezone: "Europe/London".to_owned(),
        local_time,
        weather: weather.to_owned(),
        temp_c: 18.3,
        temp_f: 64.94,
    }
}
