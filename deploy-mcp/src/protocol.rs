//! Wire types for the line-delimited JSON protocol.
//!
//! One request object per line in, one response object per line out. Framing
//! (newline splitting) lives in the server loop; these are just the shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single incoming request.
///
/// Parameters stay raw JSON here; each operation unmarshals them itself so a
/// bad parameter shape fails that request only.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub parameters: Value,
}

/// Parameters shared by every advisor method.
#[derive(Debug, Clone, Deserialize)]
pub struct CityParams {
    pub city: String,
    pub country: String,
}

/// A single outgoing response: success with an operation payload, or an
/// error with a message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum Response {
    Success(Value),
    Error { message: String },
}

impl Response {
    pub fn success(content: impl Serialize) -> Self {
        match serde_json::to_value(content) {
            Ok(value) => Response::Success(value),
            Err(err) => Response::error(format!("Error serializing response: {err}")),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error { message: message.into() }
    }
}

/// Payload for the get-weather method.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub weather: String,
    pub temp: String,
}
