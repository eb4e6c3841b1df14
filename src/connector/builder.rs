//! Builder pattern for connector configuration.
//!
//! Provides a fluent API for configuring and creating [`Dnode`] instances.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use dnode_sync_client::Dnode;
//!
//! # fn example() -> dnode_sync_client::Result<()> {
//! let dnode = Dnode::builder()
//!     .connect_timeout(Duration::from_secs(2))
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::Result;

use super::core::Dnode;
use super::options::ConnectOptions;

// ============================================================================
// DnodeBuilder
// ============================================================================

/// Builder for configuring a [`Dnode`] connector.
///
/// Use [`Dnode::builder()`] to create a new builder.
#[derive(Debug, Default, Clone)]
pub struct DnodeBuilder {
    /// Options collected so far.
    options: ConnectOptions,
}

// ============================================================================
// DnodeBuilder Implementation
// ============================================================================

impl DnodeBuilder {
    /// Creates a new builder with no timeouts.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long opening the stream may take.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Upper bound for the TCP connect
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = Some(timeout);
        self
    }

    /// Sets the read and write timeout for the opened stream.
    ///
    /// A call blocked longer than this fails with
    /// [`Error::Io`](crate::Error::Io) and closes the connection.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Upper bound for each blocking read or write
    #[inline]
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Replaces all options at once.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ConnectOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the connector with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if a timeout is zero.
    pub fn build(self) -> Result<Dnode> {
        self.options.validate()?;
        Ok(Dnode::with_options(self.options))
    }
}

// ============================================================================
// Tests
// ============================================================================
