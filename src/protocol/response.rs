//! Inbound frame validation.
//!
//! Both frames are checked field by field in a fixed order so that a
//! malformed line always produces the same error. Lines arrive as raw
//! bytes; bytes that are not UTF-8 fail as invalid JSON. Messages embed
//! the trimmed raw line.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::CallbackId;

use super::{METHODS, is_truthy, trim_line};

// ============================================================================
// Field Access
// ============================================================================

/// Returns the trimmed line for error messages, invalid bytes replaced.
fn display_line(raw: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(text) => Cow::Borrowed(trim_line(text)),
        Cow::Owned(text) => Cow::Owned(trim_line(&text).to_owned()),
    }
}

/// Decodes a line, treating invalid UTF-8 and a JSON `null` document as
/// undecodable.
fn decode(raw: &[u8]) -> Option<Value> {
    let text = std::str::from_utf8(raw).ok()?;
    match serde_json::from_str::<Value>(trim_line(text)) {
        Ok(Value::Null) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

/// Returns a field that is present and not null.
fn field<'v>(frame: &'v Value, name: &str) -> Option<&'v Value> {
    frame.get(name).filter(|v| !v.is_null())
}

// ============================================================================
// MethodsDescriptor
// ============================================================================

/// The remote's handshake frame, naming its callable methods.
///
/// # Format
///
/// ```json
/// {"method":"methods","arguments":[{"echo":"[Function]"}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodsDescriptor {
    /// Method names in declaration order.
    pub methods: Vec<String>,
}

impl MethodsDescriptor {
    /// Parses and validates a handshake line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the line is not JSON, is not a
    /// `methods` frame, does not carry exactly one argument, or that
    /// argument names no methods.
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<Self> {
        let raw = raw.as_ref();
        let line = display_line(raw);

        let frame = decode(raw)
            .ok_or_else(|| Error::protocol(format!("First line is not valid json: {line}")))?;

        let method = field(&frame, "method").ok_or_else(|| {
            Error::protocol(format!("First line does not have method field: {line}"))
        })?;

        if method.as_str() != Some(METHODS) {
            return Err(Error::protocol(format!(
                "First line method must be \"methods\": {line}"
            )));
        }

        let arguments = field(&frame, "arguments")
            .ok_or_else(|| Error::protocol(format!("Methods arguments missing: {line}")))?;

        let descriptor = match arguments.as_array().map(Vec::as_slice) {
            Some([descriptor]) => descriptor,
            _ => {
                return Err(Error::protocol(format!(
                    "Methods must have single argument: {line}"
                )));
            }
        };

        let methods: Vec<String> = descriptor
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();

        if methods.is_empty() {
            return Err(Error::protocol(format!(
                "Remote is expected to have some methods: {line}"
            )));
        }

        Ok(Self { methods })
    }
}

// ============================================================================
// CallResponse
// ============================================================================

/// The remote invoking our callback with the call's result.
///
/// # Format
///
/// ```json
/// {"method":42,"arguments":[null,"result"]}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CallResponse {
    /// Result arguments; empty when the frame had none.
    pub arguments: Vec<Value>,
}

impl CallResponse {
    /// Parses a response line and checks it answers `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the line is not JSON, has no method,
    /// answers another callback, carries `links` or `callbacks`, or has
    /// non-array arguments.
    pub fn parse(raw: impl AsRef<[u8]>, expected: CallbackId) -> Result<Self> {
        let raw = raw.as_ref();
        let line = display_line(raw);

        let mut frame = decode(raw)
            .ok_or_else(|| Error::protocol(format!("Response is not valid json: {line}")))?;

        let method = field(&frame, "method").ok_or_else(|| {
            Error::protocol(format!("Response does not have method field: {line}"))
        })?;

        if method.as_u64() != Some(expected.value()) {
            return Err(Error::protocol(format!(
                "Response does not call expected callback, expected {expected}, got {line}"
            )));
        }

        if frame.get("links").is_some_and(is_truthy) {
            return Err(Error::protocol(format!(
                "Response contains links, we do not support that: {line}"
            )));
        }

        if frame.get("callbacks").is_some_and(is_truthy) {
            return Err(Error::protocol(format!(
                "Response contains callbacks, we do not support that: {line}"
            )));
        }

        let arguments = match frame.get_mut("arguments").map(Value::take) {
            None => Vec::new(),
            Some(Value::Array(arguments)) => arguments,
            Some(_) => {
                return Err(Error::protocol(format!(
                    "Response arguments must be array: {line}"
                )));
            }
        };

        Ok(Self { arguments })
    }
}

// ============================================================================
// Tests
// ============================================================================
