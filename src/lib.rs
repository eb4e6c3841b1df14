//! dnode sync client - blocking client for the dnode RPC protocol.
//!
//! dnode speaks newline-delimited JSON over a byte stream. On connect both
//! ends exchange a `methods` frame naming what the other side may call;
//! afterwards each call carries a numeric callback ID that the remote
//! echoes in its response.
//!
//! This crate implements the client half of a small, strict subset:
//!
//! - One call in flight per connection, each call blocks until answered
//! - Responses must be terminal: `links` and further `callbacks` are rejected
//! - No server role; we declare no methods of our own
//!
//! # Quick Start
//!
//! ```no_run
//! use dnode_sync_client::{Dnode, Result};
//!
//! fn main() -> Result<()> {
//!     let mut connection = Dnode::new().connect("127.0.0.1", 8080)?;
//!
//!     println!("Remote methods: {:?}", connection.available_methods());
//!
//!     let response = connection.call("echo", &["argument".into()])?;
//!     println!("Response: {response:?}");
//!
//!     connection.close();
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`connector`] | [`Dnode`] connector and options |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Wire frames and their validation |
//! | [`transport`] | [`Connection`] and the in-memory [`MockStream`] |

// ============================================================================
// Modules
// ============================================================================

/// Connector and connect options.
///
/// Use [`Dnode::connect()`] to open a connection.
pub mod connector;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for protocol entities.
pub mod identifiers;

/// dnode wire protocol frames.
pub mod protocol;

/// Stream transport layer.
///
/// Owns the stream and runs the handshake and calls.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Connector types
pub use connector::{ConnectOptions, Dnode, DnodeBuilder};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::CallbackId;

// Transport types
pub use transport::{Connection, MockStream};

// JSON value type used for arguments and results
pub use serde_json::Value;
