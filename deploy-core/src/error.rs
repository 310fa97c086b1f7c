use thiserror::Error;

/// Which upstream API a failure came from; rendered verbatim in error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    Geocoding,
    Weather,
    Timezone,
}

impl Api {
    pub fn as_str(&self) -> &'static str {
        match self {
            Api::Geocoding => "geocoding API",
            Api::Weather => "weather API",
            Api::Timezone => "timezone API",
        }
    }
}

impl std::fmt::Display for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure modes of city-data resolution.
///
/// None of these are retried; the caller surfaces the message inside an
/// error envelope and moves on.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The geocoder returned zero candidates for the requested city.
    #[error("city not found: {city}, {country}")]
    CityNotFound { city: String, country: String },

    /// The request never produced a usable response.
    #[error("{api} request failed: {source}")]
    Transport {
        api: Api,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered, but with a non-success status code.
    #[error("{api} returned non-success status: {status}")]
    Status {
        api: Api,
        status: reqwest::StatusCode,
    },

    /// The response body did not match the expected shape.
    #[error("failed to parse {api} response: {source}")]
    Parse {
        api: Api,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_not_found_message() {
        let err = WeatherError::CityNotFound {
            city: "Atlantis".to_owned(),
            country: "Ocean".to_owned(),
        };
        assert_eq!(err.to_string(), "city not found: Atlantis, Ocean");
    }

    #[test]
    fn status_message_names_the_api() {
        let err = WeatherError::Status {
            api: Api::Timezone,
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert_eq!(
            err.to_string(),
            "timezone API returned non-success status: 502 Bad Gateway"
        );
    }
}
