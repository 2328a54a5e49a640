//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain covers one side of the tool-invocation protocol:
//! - **tools**: events, handlers and the bundled tools (server side)
//! - **client**: streaming invocation and reduction (host side)
//! - **conversation**: intent routing and reply formatting

pub mod client;
pub mod conversation;
pub mod tools;
