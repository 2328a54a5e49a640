//! Typed client for the Weather Toolkit.

use serde_json::{Map, Value};

use super::{ToolClient, ToolInvocationError, ToolResponse};
use crate::domains::tools::definitions::{CurrentWeatherTool, TemperatureUnit};

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: ToolClient,
}

impl WeatherClient {
    pub fn new(client: ToolClient) -> Self {
        Self { client }
    }

    pub async fn current_weather(
        &self,
        location: &str,
        unit: TemperatureUnit,
    ) -> Result<ToolResponse, ToolInvocationError> {
        let mut arguments = Map::new();
        arguments.insert("location".to_string(), Value::from(location));
        arguments.insert("unit".to_string(), Value::from(unit.as_str()));
        self.client.invoke(CurrentWeatherTool::NAME, arguments).await
    }
}
