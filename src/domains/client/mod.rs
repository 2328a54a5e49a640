//! Client domain module.
//!
//! Host side of the tool-invocation protocol: a generic streaming client
//! that reduces an event stream to one [`ToolResponse`] or one classified
//! [`ToolInvocationError`], and typed façades for the bundled toolkits.

#[allow(clippy::module_inception)]
mod client;
mod decoder;
mod error;
mod math;
mod weather;

pub use client::{DEFAULT_TIMEOUT, MANIFEST_PATH, ToolClient};
pub use decoder::{EventAccumulator, LineBuffer, ToolResponse, reduce};
pub use error::{InvocationErrorKind, ToolInvocationError};
pub use math::MathClient;
pub use weather::WeatherClient;
