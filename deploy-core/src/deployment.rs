use std::{fmt::Debug, sync::Arc};

use tracing::debug;

use crate::{
    model::{CityData, Deployment, Safety},
    provider::WeatherService,
};

/// Deployment decisions over resolved city data.
pub trait DeploymentService: Send + Sync + Debug {
    /// Decide whether deploying to this city is safe right now.
    fn check_safety(&self, city: &CityData) -> Safety;

    /// Attempt a (simulated) deployment to the city.
    fn deploy(&self, city: &CityData) -> Deployment;
}

/// [`DeploymentService`] gated on local business hours and clear weather.
#[derive(Debug, Clone)]
pub struct WeatherGatedDeployment {
    weather: Arc<dyn WeatherService>,
}

impl WeatherGatedDeployment {
    pub fn new(weather: Arc<dyn WeatherService>) -> Self {
        Self { weather }
    }
}

impl DeploymentService for WeatherGatedDeployment {
    /// Gates run in fixed priority order and short-circuit: business hours
    /// first, then clear/sunny weather. The first failing gate writes the
    /// reason.
    fn check_safety(&self, city: &CityData) -> Safety {
        let temp = self.weather.format_temperature(city);

        if !self.weather.is_business_hours(&city.local_time) {
            // 12-hour clock, no leading zero on the hour.
            let local = city.local_time.format("%-I:%M %p");
            return Safety {
                safe: false,
                reason: format!("Outside of business hours (current time is {local})"),
                weather: city.weather.clone(),
                temp,
            };
        }

        if !self.weather.is_clear_or_sunny(&city.weather) {
            return Safety {
                safe: false,
                reason: format!(
                    "Weather conditions are not clear/sunny (current: {})",
                    city.weather
                ),
                weather: city.weather.clone(),
                temp,
            };
        }

        Safety {
            safe: true,
            reason: "Business hours and clear/sunny weather".to_owned(),
            weather: city.weather.clone(),
            temp,
        }
    }

    /// No deployment actually happens; the verdict just picks the message.
    fn deploy(&self, city: &CityData) -> Deployment {
        let safety = self.check_safety(city);
        debug!(city = %city.name, safe = safety.safe, "deploy requested");

        if safety.safe {
            Deployment {
                deployed: true,
                message: format!(
                    "Successfully deployed to {}, {}. Current weather: {}. Temperature: {}.",
                    city.name, city.country, safety.weather, safety.temp
                ),
            }
        } else {
            Deployment {
                deployed: false,
                message: format!(
                    "Could not deploy to {}, {}: {}. Current weather: {}. Temperature: {}.",
                    city.name, city.country, safety.reason, safety.weather, safety.temp
                ),
            }
        }
    }
}
