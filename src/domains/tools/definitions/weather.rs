//! Current weather tool served by the Weather Toolkit.
//!
//! Backed by a fixed observation table; no external API is queried.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use crate::domains::tools::{ToolError, ToolHandler, ToolRegistry, parse_arguments, schema_for};

/// Server name reported on the metadata endpoint.
pub const WEATHER_SERVER_NAME: &str = "Weather Toolkit";

/// Known observations: (normalized location, condition, temperature in °C).
const OBSERVATIONS: &[(&str, &str, f64)] = &[
    ("london", "cloudy", 16.0),
    ("new york", "sunny", 22.0),
    ("los angeles", "clear", 24.0),
];

/// Temperature unit requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    /// Display suffix, e.g. `°C`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Convert a Celsius reading into this unit.
    pub fn from_celsius(self, value_c: f64) -> f64 {
        match self {
            Self::Celsius => value_c,
            Self::Fahrenheit => ((value_c * 9.0 / 5.0 + 32.0) * 10.0).round() / 10.0,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the current weather tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CurrentWeatherParams {
    /// City to look up, case-insensitive.
    pub location: String,

    /// Unit of the returned temperature.
    #[serde(default)]
    pub unit: TemperatureUnit,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Current weather tool - looks a location up in the observation table.
pub struct CurrentWeatherTool;

impl CurrentWeatherTool {
    /// Tool name as registered on the server.
    pub const NAME: &'static str = "current_weather";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Report the current condition and temperature for a known city.";

    /// Execute the tool logic.
    pub fn execute(params: &CurrentWeatherParams) -> Result<Value, ToolError> {
        let normalized = params.location.trim().to_lowercase();
        let Some((_, condition, temperature_c)) =
            OBSERVATIONS.iter().find(|(name, _, _)| *name == normalized)
        else {
            warn!("No observation for location: {}", params.location);
            return Err(ToolError::execution_failed(format!(
                "Weather data for '{}' is not available",
                params.location
            )));
        };

        Ok(json!({
            "location": title_case(&params.location),
            "condition": condition,
            "temperature": params.unit.from_celsius(*temperature_c),
            "unit": params.unit.as_str(),
        }))
    }
}

#[async_trait::async_trait]
impl ToolHandler for CurrentWeatherTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Option<Value> {
        schema_for::<CurrentWeatherParams>()
    }

    #[instrument(skip_all)]
    async fn call(&self, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let params: CurrentWeatherParams = parse_arguments(arguments)?;
        info!("Weather lookup for {} in {}", params.location, params.unit);
        Self::execute(&params)
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Registry holding the weather tool.
pub fn weather_registry() -> ToolRegistry {
    ToolRegistry::new().with_tool(CurrentWeatherTool)
}
