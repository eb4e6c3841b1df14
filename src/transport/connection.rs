//! Synchronous dnode connection.
//!
//! A [`Connection`] owns its stream, performs the methods handshake on
//! construction and then runs one call at a time: write a request line,
//! block for the response line, check it answers our callback.
//!
//! # Lifecycle
//!
//! 1. `Connection::new` - send our (empty) methods frame, read the remote's
//! 2. `Connection::call` - any number of round trips
//! 3. `Connection::close` - release the stream; also forced by a failed read
//!
//! A read that yields no line during a call closes the connection for
//! good. Protocol errors leave it open.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::CallbackId;
use crate::protocol::{CallResponse, MethodsDescriptor, Request};

// ============================================================================
// Connection
// ============================================================================

/// Connection to a dnode service over a byte stream.
///
/// Not reentrant: one call must return before the next is issued.
///
/// # Example
///
/// ```no_run
/// use dnode_sync_client::Dnode;
///
/// # fn example() -> dnode_sync_client::Result<()> {
/// let mut connection = Dnode::new().connect("127.0.0.1", 8080)?;
///
/// let response = connection.call("echo", &["argument".into()])?;
/// println!("{response:?}");
///
/// connection.close();
/// # Ok(())
/// # }
/// ```
pub struct Connection<S: Read + Write> {
    /// Buffered stream; `None` once closed.
    stream: Option<BufReader<S>>,
    /// Remote method names in declaration order.
    methods: Vec<String>,
    /// Lookup set over `methods`.
    method_index: FxHashSet<String>,
    /// Last callback ID handed out.
    callback: CallbackId,
}

// ============================================================================
// Connection - Display
// ============================================================================

impl<S: Read + Write> fmt::Debug for Connection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("methods", &self.methods)
            .field("callback", &self.callback)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Connection - Handshake
// ============================================================================

impl<S: Read + Write> Connection<S> {
    /// Performs the handshake on `stream` and returns a ready connection.
    ///
    /// Prefer [`Dnode::connect`](crate::Dnode::connect) when host and port
    /// are known.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if no methods line can be read
    /// - [`Error::Protocol`] if the methods line is malformed
    pub fn new(stream: S) -> Result<Self> {
        let mut reader = BufReader::new(stream);

        send_line(reader.get_mut(), &Request::methods().to_line()?);

        let line = receive_line(&mut reader)
            .ok_or_else(|| Error::io("Can't read method description from remote"))?;

        let MethodsDescriptor { methods } = MethodsDescriptor::parse(line)?;
        let method_index = methods.iter().cloned().collect();

        debug!(count = methods.len(), "Handshake completed");

        Ok(Self {
            stream: Some(reader),
            methods,
            method_index,
            callback: CallbackId::SEED,
        })
    }
}

// ============================================================================
// Connection - Public API
// ============================================================================

impl<S: Read + Write> Connection<S> {
    /// Calls `method` with `arguments` and returns the response arguments.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the connection is closed
    /// - [`Error::MethodNotExists`] if the remote did not declare `method`
    /// - [`Error::Io`] if no response line can be read; the connection is closed
    /// - [`Error::Protocol`] if the response is malformed or unsupported
    pub fn call(&mut self, method: &str, arguments: &[Value]) -> Result<Vec<Value>> {
        let Some(reader) = self.stream.as_mut() else {
            return Err(Error::ConnectionClosed);
        };

        if !self.method_index.contains(method) {
            return Err(Error::method_not_exists(method));
        }

        self.callback = self.callback.next();
        let expected = self.callback;

        let line = Request::call(method, arguments, expected).to_line()?;
        trace!(callback = %expected, method, "Sending call");
        send_line(reader.get_mut(), &line);

        let Some(response) = receive_line(reader) else {
            warn!(callback = %expected, method, "No response from remote, closing connection");
            self.close();
            return Err(Error::io("Can't read response from remote"));
        };

        let CallResponse { arguments } = CallResponse::parse(response, expected)?;
        trace!(callback = %expected, count = arguments.len(), "Response received");

        Ok(arguments)
    }

    /// Calls `method` without arguments.
    ///
    /// # Errors
    ///
    /// Same as [`Connection::call`].
    #[inline]
    pub fn call0(&mut self, method: &str) -> Result<Vec<Value>> {
        self.call(method, &[])
    }

    /// Returns the method names the remote declared, in declaration order.
    #[inline]
    #[must_use]
    pub fn available_methods(&self) -> &[String] {
        &self.methods
    }

    /// Returns `true` if the remote declared `method`.
    #[inline]
    #[must_use]
    pub fn has_method(&self, method: &str) -> bool {
        self.method_index.contains(method)
    }

    /// Returns the callback ID used by the most recent call.
    ///
    /// Equals [`CallbackId::SEED`] before the first call.
    #[inline]
    #[must_use]
    pub fn last_callback_id(&self) -> CallbackId {
        self.callback
    }

    /// Returns `true` once the connection is closed.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.stream.is_none()
    }

    /// Closes the connection and releases the stream.
    ///
    /// Calling this again is a no-op.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!("Connection closed");
        }
    }
}

// ============================================================================
// Line I/O
// ============================================================================

/// Writes one line, logging instead of failing.
///
/// A broken stream surfaces on the read that follows.
fn send_line<W: Write>(stream: &mut W, line: &str) {
    if let Err(e) = stream.write_all(line.as_bytes()).and_then(|()| stream.flush()) {
        debug!(error = %e, "Failed to write line");
    }
}

/// Reads one raw line, returning `None` on end of stream or error.
///
/// Bytes are returned undecoded; the frame parsers reject invalid UTF-8.
fn receive_line<R: BufRead>(reader: &mut R) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => {
            debug!("Stream ended");
            None
        }
        Ok(_) => Some(buf),
        Err(e) => {
            debug!(error = %e, "Failed to read line");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
