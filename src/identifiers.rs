//! Type-safe identifiers for protocol entities.
//!
//! Newtype wrappers keep callback numbers from being confused with
//! argument counts or other integers on the wire.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CallbackId
// ============================================================================

/// Numeric identifier tagging a call; the remote echoes it in its response.
///
/// Each connection starts from [`CallbackId::SEED`] and advances before
/// every call, so the first call uses `42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(u64);

impl CallbackId {
    /// Counter value before the first call.
    pub const SEED: Self = Self(41);

    /// Creates a callback ID from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the following ID.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the string key used in the `callbacks` map.
    #[inline]
    #[must_use]
    pub fn key(self) -> String {
        self.0.to_string()
    }
}

impl Default for CallbackId {
    fn default() -> Self {
        Self::SEED
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CallbackId> for u64 {
    fn from(id: CallbackId) -> Self {
        id.0
    }
}

// ============================================================================
// Tests
// ============================================================================
