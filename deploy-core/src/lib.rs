//! Core library for the weather-gated deployment advisor.
//!
//! This crate defines:
//! - Configuration handling
//! - The weather data client over Open-Meteo (geocoding, current weather, timezone)
//! - Weather-code translation and the deployment safety rules
//!
//! It is used by `deploy-mcp`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod deployment;
pub mod error;
pub mod model;
pub mod provider;

pub use codes::describe_weather_code;
pub use config::Config;
pub use deployment::{DeploymentService, WeatherGatedDeployment};
pub use error::WeatherError;
pub use model::{CityData, Deployment, Safety, celsius_to_fahrenheit};
pub use provider::{WeatherService, openmeteo::OpenMeteoService};
