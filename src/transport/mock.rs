//! In-memory duplex stream for driving a [`Connection`](super::Connection)
//! without a socket.
//!
//! Clones share state, so a test keeps one handle to script reads and
//! inspect writes while the connection owns another.
//!
//! # Example
//!
//! ```
//! use dnode_sync_client::transport::{Connection, MockStream};
//!
//! let stream = MockStream::new();
//! stream.push_read("{\"method\":\"methods\",\"arguments\":[{\"echo\":\"\"}]}\n");
//!
//! let mut connection = Connection::new(stream.clone())?;
//! assert_eq!(stream.take_writes(), vec!["{\"method\":\"methods\"}\n"]);
//!
//! stream.push_read("{\"method\":42,\"arguments\":[null,\"hi\"]}\n");
//! let result = connection.call("echo", &["hi".into()])?;
//! assert_eq!(result.len(), 2);
//! # Ok::<(), dnode_sync_client::Error>(())
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

// ============================================================================
// MockState
// ============================================================================

/// Shared buffers behind every clone of a [`MockStream`].
#[derive(Debug, Default)]
struct MockState {
    /// Bytes the next reads will return.
    reads: VecDeque<u8>,
    /// Everything written so far and not yet taken.
    writes: Vec<u8>,
    /// Error returned by every read once set.
    read_error: Option<ErrorKind>,
    /// Error returned by every write once set.
    write_error: Option<ErrorKind>,
}

// ============================================================================
// MockStream
// ============================================================================

/// Scripted duplex stream.
///
/// Reads drain queued bytes and report end of stream once the queue is
/// empty. Writes are captured for inspection.
#[derive(Debug, Clone, Default)]
pub struct MockStream {
    state: Arc<Mutex<MockState>>,
}

impl MockStream {
    /// Creates a stream with nothing to read.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stream pre-loaded with the given lines.
    ///
    /// A newline is appended to each line.
    #[must_use]
    pub fn with_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let stream = Self::new();
        for line in lines {
            stream.push_read(format!("{}\n", line.as_ref()));
        }
        stream
    }

    /// Queues raw bytes for subsequent reads.
    ///
    /// Accepts text as well as bytes that are not valid UTF-8.
    pub fn push_read(&self, data: impl AsRef<[u8]>) {
        self.state.lock().reads.extend(data.as_ref().iter().copied());
    }

    /// Makes every following read fail with `kind`.
    pub fn fail_reads(&self, kind: ErrorKind) {
        self.state.lock().read_error = Some(kind);
    }

    /// Makes every following write fail with `kind`.
    pub fn fail_writes(&self, kind: ErrorKind) {
        self.state.lock().write_error = Some(kind);
    }

    /// Returns the number of queued bytes not yet read.
    #[must_use]
    pub fn pending_reads(&self) -> usize {
        self.state.lock().reads.len()
    }

    /// Drains everything written so far, split into lines.
    ///
    /// Each line keeps its trailing newline; a trailing partial line is
    /// returned as is.
    pub fn take_writes(&self) -> Vec<String> {
        let written = std::mem::take(&mut self.state.lock().writes);
        String::from_utf8_lossy(&written)
            .split_inclusive('\n')
            .map(str::to_owned)
            .collect()
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        if let Some(kind) = state.read_error {
            return Err(io::Error::new(kind, "mock read failure"));
        }

        let n = buf.len().min(state.reads.len());
        for (slot, byte) in buf.iter_mut().zip(state.reads.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        if let Some(kind) = state.write_error {
            return Err(io::Error::new(kind, "mock write failure"));
        }

        state.writes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
