use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    codes::describe_weather_code,
    config::Config,
    error::{Api, WeatherError},
    model::{CityData, celsius_to_fahrenheit},
};

use super::WeatherService;

/// Live [`WeatherService`] backed by the Open-Meteo public APIs.
///
/// Every resolution performs three sequential lookups (geocode, current
/// weather, timezone) with no caching between calls, so repeated queries for
/// the same city re-fetch everything.
#[derive(Debug, Clone)]
pub struct OpenMeteoService {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoService {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            http,
        })
    }

    /// Resolve coordinates for a city. Candidates whose country field equals
    /// the supplied country win; otherwise the first result stands in.
    async fn geocode(&self, city: &str, country: &str) -> Result<(f64, f64), WeatherError> {
        let url = format!("{}/v1/search", self.geocoding_url);

        let res = self
            .http
            .get(&url)
            .query(&[("name", city), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await
            .map_err(|source| WeatherError::Transport { api: Api::Geocoding, source })?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Status { api: Api::Geocoding, status });
        }

        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { api: Api::Geocoding, source })?;

        let parsed: GeocodingResponse = serde_json::from_str(&body)
            .map_err(|source| WeatherError::Parse { api: Api::Geocoding, source })?;

        let Some(first) = parsed.results.first() else {
            return Err(WeatherError::CityNotFound {
                city: city.to_owned(),
                country: country.to_owned(),
            });
        };

        let picked = parsed
            .results
            .iter()
            .find(|candidate| candidate.country.as_deref() == Some(country))
            .unwrap_or(first);

        debug!(
            city,
            latitude = picked.latitude,
            longitude = picked.longitude,
            "geocoded city"
        );
        Ok((picked.latitude, picked.longitude))
    }

    /// Fetch the current temperature and weather description for a location.
    async fn current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<(String, f64), WeatherError> {
        let url = format!("{}/v1/forecast", self.forecast_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m,weather_code".to_owned()),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Transport { api: Api::Weather, source })?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Status { api: Api::Weather, status });
        }

        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { api: Api::Weather, source })?;

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|source| WeatherError::Parse { api: Api::Weather, source })?;

        let weather = describe_weather_code(parsed.current.weather_code).to_owned();
        Ok((weather, parsed.current.temperature_2m))
    }

    /// Fetch the IANA timezone name applicable at a location.
    async fn timezone(&self, latitude: f64, longitude: f64) -> Result<String, WeatherError> {
        let url = format!("{}/v1/forecast", self.forecast_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("timezone", "auto".to_owned()),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Transport { api: Api::Timezone, source })?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Status { api: Api::Timezone, status });
        }

        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport { api: Api::Timezone, source })?;

        let parsed: TimezoneResponse = serde_json::from_str(&body)
            .map_err(|source| WeatherError::Parse { api: Api::Timezone, source })?;

        Ok(parsed.timezone)
    }
}

#[async_trait]
impl WeatherService for OpenMeteoService {
    async fn city_data(&self, city: &str, country: &str) -> Result<CityData, WeatherError> {
        debug!(city, country, "resolving city data");

        let (latitude, longitude) = self.geocode(city, country).await?;
        let (weather, temp_c) = self.current_weather(latitude, longitude).await?;
        let timezone = self.timezone(latitude, longitude).await?;
        let local_time = local_time_in(&timezone);

        Ok(CityData {
            name: city.to_owned(),
            country: country.to_owned(),
            latitude,
            longitude,
            timezone,
            local_time,
            weather,
            temp_c,
            temp_f: celsius_to_fahrenheit(temp_c),
        })
    }
}

/// Project "now" into the named timezone.
///
/// An identifier chrono-tz doesn't know degrades to UTC rather than failing;
/// unresolved timezones are the one lookup that never errors.
pub fn local_time_in(timezone: &str) -> DateTime<FixedOffset> {
    match timezone.parse::<Tz>() {
        Ok(tz) => Utc::now().with_timezone(&tz).fixed_offset(),
        Err(_) => {
            warn!(timezone, "unknown timezone identifier, using UTC");
            Utc::now().fixed_offset()
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature_2m: f64,
    weather_code: i64,
}

#[derive(Debug, Deserialize)]
struct TimezoneResponse {
    timezone: String,
}
