//! dnode wire protocol message types.
//!
//! Every message is a single JSON object terminated by a newline.
//!
//! # Protocol Overview
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | Methods request | Local → Remote | Declares that we expose no methods |
//! | Methods descriptor | Remote → Local | Names the remote's callable methods |
//! | Call request | Local → Remote | Invokes a method, tags it with a callback ID |
//! | Call response | Remote → Local | Invokes our callback with the result arguments |
//!
//! Only a subset of dnode is understood: responses carrying `links` or
//! further `callbacks` are rejected.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `request` | Outbound frames and line encoding |
//! | `response` | Inbound frame validation |
//! | `value` | JSON truthiness rules |

// ============================================================================
// Submodules
// ============================================================================

/// Outbound request frames.
pub mod request;

/// Inbound frame validation.
pub mod response;

/// JSON value helpers.
pub mod value;

// ============================================================================
// Re-exports
// ============================================================================

pub use request::{Callbacks, Request};
pub use response::{CallResponse, MethodsDescriptor};
pub use value::is_truthy;

// ============================================================================
// Constants
// ============================================================================

/// Method name of the handshake frame, both directions.
pub const METHODS: &str = "methods";

// ============================================================================
// Line Helpers
// ============================================================================

/// Strips surrounding whitespace, NUL and vertical tab from a received line.
#[inline]
#[must_use]
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

// ============================================================================
// Tests
// ============================================================================
