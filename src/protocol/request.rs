//! Outbound request frames.
//!
//! Frames serialize compactly with keys in the order `method`,
//! `arguments`, `callbacks`.

// ============================================================================
// Imports
// ============================================================================

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::CallbackId;

use super::METHODS;

// ============================================================================
// Request
// ============================================================================

/// A frame sent from the local end to the remote end.
///
/// # Format
///
/// Handshake:
/// ```json
/// {"method":"methods"}
/// ```
///
/// Call:
/// ```json
/// {"method":"echo","arguments":["hi"],"callbacks":{"42":[1]}}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Request<'a> {
    /// Method name to invoke on the remote.
    pub method: &'a str,

    /// Positional arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<&'a [Value]>,

    /// The single synthetic callback standing for the response handler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<Callbacks>,
}

impl<'a> Request<'a> {
    /// Creates the handshake frame.
    ///
    /// We declare no methods of our own, so the frame has no arguments.
    #[inline]
    #[must_use]
    pub const fn methods() -> Self {
        Self {
            method: METHODS,
            arguments: None,
            callbacks: None,
        }
    }

    /// Creates a call frame tagged with `callback`.
    #[inline]
    #[must_use]
    pub fn call(method: &'a str, arguments: &'a [Value], callback: CallbackId) -> Self {
        Self {
            method,
            arguments: Some(arguments),
            callbacks: Some(Callbacks::new(callback, arguments.len())),
        }
    }

    /// Encodes the frame as one compact JSON line ending in `\n`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if an argument cannot be serialized.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)
            .map_err(|e| Error::protocol(format!("Request could not be encoded: {e}")))?;
        line.push('\n');
        Ok(line)
    }
}

// ============================================================================
// Callbacks
// ============================================================================

/// The `callbacks` field of a call frame.
///
/// Serializes as `{"<id>":[<arity>]}`. The arity is the number of positional
/// arguments sent; the response is never checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Callbacks {
    /// Callback ID the remote must answer with.
    pub id: CallbackId,
    /// Argument count announced for the callback.
    pub arity: usize,
}

impl Callbacks {
    /// Creates a callbacks field.
    #[inline]
    #[must_use]
    pub const fn new(id: CallbackId, arity: usize) -> Self {
        Self { id, arity }
    }
}

impl Serialize for Callbacks {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id.key(), &[self.arity])?;
        map.end()
    }
}

// ============================================================================
// Tests
// ============================================================================
