//! Connector module.
//!
//! This module provides the entry point for opening dnode connections.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Dnode`] | Opens streams and hands them to a connection |
//! | [`DnodeBuilder`] | Fluent configuration builder |
//! | [`ConnectOptions`] | Connect and read/write timeouts |
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use dnode_sync_client::{Dnode, Result};
//!
//! # fn example() -> Result<()> {
//! let dnode = Dnode::builder()
//!     .connect_timeout(Duration::from_secs(2))
//!     .build()?;
//!
//! let mut connection = dnode.connect("127.0.0.1", 8080)?;
//! let response = connection.call("echo", &["argument".into()])?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for connector configuration.
pub mod builder;

/// Core connector implementation.
pub mod core;

/// Connect and stream timeouts.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::DnodeBuilder;
pub use self::core::{Dnode, tcp_address};
pub use options::ConnectOptions;
