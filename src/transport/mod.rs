//! Stream transport layer.
//!
//! This module owns the byte stream and runs the synchronous dnode
//! exchange over it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Caller (Rust)  │                              │  dnode service  │
//! │                 │   newline-delimited JSON     │                 │
//! │  Connection     │◄────────────────────────────►│                 │
//! │                 │      tcp://HOST:PORT         │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | Handshake, calls and stream lifecycle |
//! | `mock` | In-memory stream for tests and offline use |

// ============================================================================
// Submodules
// ============================================================================

/// Synchronous connection over a byte stream.
pub mod connection;

/// In-memory scripted stream.
pub mod mock;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
pub use mock::MockStream;
