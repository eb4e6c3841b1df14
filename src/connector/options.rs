//! Stream options applied when connecting.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use dnode_sync_client::ConnectOptions;
//!
//! let options = ConnectOptions::new()
//!     .with_connect_timeout(Duration::from_secs(2))
//!     .with_timeout(Duration::from_secs(10));
//!
//! assert!(options.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use crate::error::{Error, Result};

// ============================================================================
// ConnectOptions
// ============================================================================

/// Timeouts for opening and using the stream.
///
/// `None` leaves the operating system default in place: a blocking connect
/// and reads that wait indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Upper bound for opening the stream.
    pub connect_timeout: Option<Duration>,

    /// Read and write timeout applied to the opened stream.
    pub timeout: Option<Duration>,
}

// ============================================================================
// Constructors
// ============================================================================

impl ConnectOptions {
    /// Creates options with no timeouts.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connect_timeout: None,
            timeout: None,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ConnectOptions {
    /// Sets the connect timeout.
    #[inline]
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the read/write timeout.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ConnectOptions {
    /// Checks that no timeout is zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending timeout.
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::config("connect timeout must be greater than zero"));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_timeouts() {
        let options = ConnectOptions::new();
        assert_eq!(options, ConnectOptions::default());
        assert!(options.connect_timeout.is_none());
        assert!(options.timeout.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let options = ConnectOptions::new()
            .with_connect_timeout(Duration::from_millis(250))
            .with_timeout(Duration::from_secs(5));

        assert_eq!(options.connect_timeout, Some(Duration::from_millis(250)));
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_connect_timeout_rejected() {
        let err = ConnectOptions::new()
            .with_connect_timeout(Duration::ZERO)
            .validate()
            .expect_err("zero");
        assert!(err.to_string().contains("connect timeout"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ConnectOptions::new()
            .with_timeout(Duration::ZERO)
            .validate()
            .expect_err("zero");
        assert!(matches!(err, Error::Config { .. }));
    }
}
