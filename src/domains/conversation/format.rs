//! Natural-language rendering of tool results.

use serde_json::Value;

use crate::domains::client::ToolResponse;
use crate::domains::tools::definitions::{MathOperation, TemperatureUnit};

/// Reply used when no tool applies.
pub const FALLBACK_REPLY: &str =
    "I'm not sure how to help with that yet. Try asking about math or the weather.";

const DEFAULT_LOCATION: &str = "the requested location";

/// Render a value the way a person would read it: strings bare, everything
/// else as JSON (`2.0`, `60.8`, `[1,2]`).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn operation_symbol(operation: &str) -> &str {
    match operation.parse::<MathOperation>() {
        Ok(MathOperation::Add) => "+",
        Ok(MathOperation::Subtract) => "-",
        Ok(MathOperation::Multiply) => "×",
        Err(_) => operation,
    }
}

fn non_null<'a>(result: &'a Value, key: &str) -> Option<&'a Value> {
    result.get(key).filter(|v| !v.is_null())
}

/// `The result of 2.0 + 3.0 is 5.0.`
pub fn format_math_reply(response: &ToolResponse) -> String {
    let result = &response.result;
    let operation = result
        .get("operation")
        .and_then(Value::as_str)
        .unwrap_or(&response.tool_name);

    let total = non_null(result, "total");
    let operands = result.get("operands").and_then(Value::as_array);

    match (total, operands.map(Vec::as_slice)) {
        (Some(total), Some([first, second])) => format!(
            "The result of {} {} {} is {}.",
            display_value(first),
            operation_symbol(operation),
            display_value(second),
            display_value(total)
        ),
        _ => format!("The tool returned: {}", display_value(result)),
    }
}

/// `The weather in London is cloudy with a temperature of 16.0°C.`
pub fn format_weather_reply(response: &ToolResponse) -> String {
    let result = &response.result;
    let condition = non_null(result, "condition");
    let temperature = non_null(result, "temperature");

    let (Some(condition), Some(temperature)) = (condition, temperature) else {
        return format!("Weather tool response: {}", display_value(result));
    };

    let location = non_null(result, "location")
        .map(display_value)
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());
    let unit = match result.get("unit").and_then(Value::as_str) {
        Some("fahrenheit") => TemperatureUnit::Fahrenheit,
        _ => TemperatureUnit::Celsius,
    };

    format!(
        "The weather in {} is {} with a temperature of {}{}.",
        location,
        display_value(condition),
        display_value(temperature),
        unit.suffix()
    )
}
