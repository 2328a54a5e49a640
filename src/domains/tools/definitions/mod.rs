//! Tool definitions module.
//!
//! The tools served by the bundled services, one file per toolkit.

pub mod math;
pub mod weather;

pub use math::{
    ArithmeticParams, ArithmeticTool, MATH_SERVER_NAME, MathOperation, UnknownOperation,
    math_metadata, math_registry,
};
pub use weather::{
    CurrentWeatherParams, CurrentWeatherTool, TemperatureUnit, WEATHER_SERVER_NAME,
    weather_registry,
};
