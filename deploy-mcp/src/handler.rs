use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use deploy_core::{DeploymentService, WeatherError, WeatherService};

use crate::protocol::{CityParams, Request, Response, WeatherReport};

/// Maps method names onto advisor operations.
///
/// Stateless: every call resolves one request into exactly one response, and
/// every failure becomes an error envelope rather than bubbling up.
pub struct Handler {
    weather: Arc<dyn WeatherService>,
    deployment: Arc<dyn DeploymentService>,
}

impl Handler {
    pub fn new(weather: Arc<dyn WeatherService>, deployment: Arc<dyn DeploymentService>) -> Self {
        Self { weather, deployment }
    }

    pub async fn process(&self, request: Request) -> Response {
        debug!(method = %request.method, "processing request");

        match request.method.as_str() {
            "check-deployment-safety" => self.check_deployment_safety(request.parameters).await,
            "deploy-to-city" => self.deploy_to_city(request.parameters).await,
            "get-weather" => self.get_weather(request.parameters).await,
            other => {
                warn!(method = %other, "unknown method");
                Response::error(format!("Unknown method: {other}"))
            }
        }
    }

    async fn check_deployment_safety(&self, parameters: Value) -> Response {
        let params = match parse_params(parameters) {
            Ok(params) => params,
            Err(response) => return response,
        };

        let city = match self.weather.city_data(&params.city, &params.country).await {
            Ok(city) => city,
            Err(err) => return city_data_error(&err),
        };

        Response::success(self.deployment.check_safety(&city))
    }

    async fn deploy_to_city(&self, parameters: Value) -> Response {
        let params = match parse_params(parameters) {
            Ok(params) => params,
            Err(response) => return response,
        };

        let city = match self.weather.city_data(&params.city, &params.country).await {
            Ok(city) => city,
            Err(err) => return city_data_error(&err),
        };

        Response::success(self.deployment.deploy(&city))
    }

    async fn get_weather(&self, parameters: Value) -> Response {
        let params = match parse_params(parameters) {
            Ok(params) => params,
            Err(response) => return response,
        };

        let city = match self.weather.city_data(&params.city, &params.country).await {
            Ok(city) => city,
            Err(err) => return city_data_error(&err),
        };

        let temp = self.weather.format_temperature(&city);
        Response::success(WeatherReport {
            city: params.city,
            country: params.country,
            weather: city.weather,
            temp,
        })
    }
}

fn parse_params(parameters: Value) -> Result<CityParams, Response> {
    serde_json::from_value(parameters)
        .map_err(|err| Response::error(format!("Error parsing parameters: {err}")))
}

fn city_data_error(err: &WeatherError) -> Response {
    warn!(error = %err, "city data resolution failed");
    Response::error(format!("Error getting city data: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubWeather, london_at};
    use deploy_core::WeatherGatedDeployment;
    use serde_json::json;

    fn handler(stub: StubWeather) -> Handler {
        let weather = Arc::new(stub);
        let deployment = Arc::new(WeatherGatedDeployment::new(weather.clone()));
        Handler::new(weather, deployment)
    }

    fn request(method: &str, parameters: Value) -> Request {
        Request { method: method.to_owned(), parameters }
    }

    fn city_params() -> Value {
        json!({ "city": "London", "country": "United Kingdom" })
    }

    #[tokio::test]
    async fn unknown_method_is_rejected() {
        let handler = handler(StubWeather::NotFound);
        let response = handler.process(request("foo", city_params())).await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "type": "error",
                "content": { "message": "Unknown method: foo" }
            })
        );
    }

    #[tokio::test]
    async fn malformed_parameters_are_rejected_per_request() {
        let handler = handler(StubWeather::NotFound);
        let response = handler
            .process(request("get-weather", json!({ "city": 42 })))
            .await;

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "error");
        let message = value["content"]["message"].as_str().unwrap();
        assert!(message.starts_with("Error parsing parameters: "), "{message}");
    }

    #[tokio::test]
    async fn missing_city_yields_upstream_error_message() {
        let handler = handler(StubWeather::NotFound);
        let response = handler
            .process(request(
                "get-weather",
                json!({ "city": "Atlantis", "country": "Ocean" }),
            ))
            .await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "type": "error",
                "content": { "message": "Error getting city data: city not found: Atlantis, Ocean" }
            })
        );
    }

    #[tokio::test]
    async fn get_weather_returns_report_without_safety_check() {
        let handler = handler(StubWeather::City(london_at(20, 0, "Overcast")));
        let response = handler.process(request("get-weather", city_params())).await;

        // Off hours and overcast, but get-weather never judges safety.
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "type": "success",
                "content": {
                    "city": "London",
                    "country": "United Kingdom",
                    "weather": "Overcast",
                    "temp": "18.3°C"
                }
            })
        );
    }

    #[tokio::test]
    async fn check_safety_returns_verdict_payload() {
        let handler = handler(StubWeather::City(london_at(14, 0, "Clear sky")));
        let response = handler
            .process(request("check-deployment-safety", city_params()))
            .await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "type": "success",
                "content": {
                    "safe": true,
                    "reason": "Business hours and clear/sunny weather",
                    "weather": "Clear sky",
                    "temp": "18.3°C"
                }
            })
        );
    }

    #[tokio::test]
    async fn deploy_returns_flag_and_message() {
        let handler = handler(StubWeather::City(london_at(20, 0, "Clear sky")));
        let response = handler.process(request("deploy-to-city", city_params())).await;

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "type": "success",
                "content": {
                    "deployed": false,
                    "message": "Could not deploy to London, United Kingdom: \
                        Outside of business hours (current time is 8:00 PM). \
                        Current weather: Clear sky. Temperature: 18.3°C."
                }
            })
        );
    }
}
