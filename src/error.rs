//! Error types for the dnode client.
//!
//! This module defines the closed set of failures a caller must handle.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use dnode_sync_client::{Connection, Error, Result};
//!
//! fn example(connection: &mut Connection<std::net::TcpStream>) -> Result<()> {
//!     match connection.call("echo", &["hello".into()]) {
//!         Ok(arguments) => println!("{arguments:?}"),
//!         Err(Error::MethodNotExists { method }) => println!("no such method: {method}"),
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Stream | [`Error::Io`] |
//! | Protocol | [`Error::Protocol`] |
//! | Local validation | [`Error::MethodNotExists`], [`Error::ConnectionClosed`] |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Every variant carries the text a caller needs for diagnosis; the
/// remote's raw line is embedded in protocol messages.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Connector configuration error.
    ///
    /// Returned before any I/O when a timeout is zero.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Stream Errors
    // ========================================================================
    /// The stream could not be opened or a blocking read yielded nothing.
    ///
    /// Returned from [`Connection::call`](crate::Connection::call) this
    /// also means the connection has been closed.
    #[error("I/O error: {message}")]
    Io {
        /// Human readable cause.
        message: String,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// The remote sent a frame outside the supported protocol subset.
    ///
    /// Does not close the connection.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description including the offending raw line.
        message: String,
    },

    // ========================================================================
    // Local Validation Errors
    // ========================================================================
    /// The called method was not declared by the remote during handshake.
    #[error("Method {method} does not exists on remote.")]
    MethodNotExists {
        /// The requested method name.
        method: String,
    },

    /// The connection was closed, explicitly or by an earlier I/O failure.
    #[error("Connection closed")]
    ConnectionClosed,
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an I/O error.
    #[inline]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a method not exists error.
    #[inline]
    pub fn method_not_exists(method: impl Into<String>) -> Self {
        Self::MethodNotExists {
            method: method.into(),
        }
    }

    /// Creates the error returned when the stream cannot be opened.
    ///
    /// Format: `Can't create socket to {address}. Error: {code} {reason}`
    pub fn socket_failed(address: &str, code: i32, reason: impl fmt::Display) -> Self {
        Self::io(format!(
            "Can't create socket to {address}. Error: {code} {reason}"
        ))
    }

    /// Creates a [`socket_failed`](Self::socket_failed) error from an OS
    /// error, using `0` when it carries no OS code.
    pub fn connect_failed(address: &str, err: &IoError) -> Self {
        Self::socket_failed(address, err.raw_os_error().unwrap_or(0), err)
    }
}

// ============================================================================
// Error Accessors
// ============================================================================

impl Error {
    /// Returns the bare message without the category prefix.
    ///
    /// [`Error::ConnectionClosed`] has no payload and yields an empty string.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Config { message } | Self::Io { message } | Self::Protocol { message } => {
                message.clone()
            }
            Self::MethodNotExists { .. } => self.to_string(),
            Self::ConnectionClosed => String::new(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a stream error.
    #[inline]
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if this is a protocol error.
    #[inline]
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    /// Returns `true` if the error was raised locally without touching the stream.
    #[inline]
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::MethodNotExists { .. } | Self::ConnectionClosed
        )
    }

    /// Returns `true` if a call failing with this error closed the connection.
    #[inline]
    #[must_use]
    pub fn closes_connection(&self) -> bool {
        self.is_io_error()
    }
}

// ============================================================================
// Tests
// ============================================================================
