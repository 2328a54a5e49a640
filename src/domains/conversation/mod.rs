//! Conversation domain module.
//!
//! Turns a free-text question into at most one tool call and a
//! natural-language reply.
//!
//! ## Architecture
//!
//! - `intent.rs` - Ordered rules deciding math / weather / nothing
//! - `format.rs` - Pure rendering of tool results into sentences
//! - `router.rs` - Dispatch to the typed clients
//! - `schema.rs` - Endpoint request and response bodies
//! - `error.rs` - Conversation-specific error types

mod error;
pub mod format;
pub mod intent;
mod router;
mod schema;

pub use error::ConversationError;
pub use format::FALLBACK_REPLY;
pub use intent::{Intent, MathQuestion, WeatherQuestion, detect_intent};
pub use router::ConversationRouter;
pub use schema::{ConversationRequest, ConversationResponse, ToolCallSummary};
