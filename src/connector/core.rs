//! dnode connector.
//!
//! The [`Dnode`] struct turns a host and port, or an address string, into
//! a handshaken [`Connection`]. A single connect attempt is made; failures
//! surface immediately.
//!
//! # Example
//!
//! ```no_run
//! use dnode_sync_client::Dnode;
//!
//! # fn example() -> dnode_sync_client::Result<()> {
//! let mut connection = Dnode::new().connect("127.0.0.1", 8080)?;
//! println!("{:?}", connection.available_methods());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::io::{self, ErrorKind};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::transport::Connection;

use super::builder::DnodeBuilder;
use super::options::ConnectOptions;

// ============================================================================
// Constants
// ============================================================================

/// The only address scheme understood.
const TCP_SCHEME: &str = "tcp";

// ============================================================================
// Dnode
// ============================================================================

/// Connector for dnode services.
///
/// Holds the [`ConnectOptions`] applied to every stream it opens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dnode {
    /// Options for each new stream.
    options: ConnectOptions,
}

// ============================================================================
// Dnode - Public API
// ============================================================================

impl Dnode {
    /// Creates a connector with default options.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: ConnectOptions::new(),
        }
    }

    /// Creates a connector with the given options.
    ///
    /// Options are validated when connecting.
    #[inline]
    #[must_use]
    pub const fn with_options(options: ConnectOptions) -> Self {
        Self { options }
    }

    /// Creates a configuration builder for the connector.
    #[inline]
    #[must_use]
    pub fn builder() -> DnodeBuilder {
        DnodeBuilder::new()
    }

    /// Returns the options applied to new streams.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &ConnectOptions {
        &self.options
    }

    /// Connects to `host:port` and performs the handshake.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the stream cannot be opened or no methods line arrives
    /// - [`Error::Protocol`] if the methods line is malformed
    /// - [`Error::Config`] if a timeout is zero
    pub fn connect(&self, host: &str, port: u16) -> Result<Connection<TcpStream>> {
        self.connect_to_address(&tcp_address(host, port))
    }

    /// Connects to `address` and performs the handshake.
    ///
    /// Accepts `tcp://host:port` or a bare `host:port`.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if a timeout is zero
    /// - [`Error::Io`] if the address is unusable, the stream cannot be
    ///   opened or no methods line arrives
    /// - [`Error::Protocol`] if the methods line is malformed
    pub fn connect_to_address(&self, address: &str) -> Result<Connection<TcpStream>> {
        self.options.validate()?;
        let target = socket_target(address)?;

        debug!(address, "Connecting");
        let stream = self.open(address, &target)?;
        debug!(address, "Stream opened");

        Connection::new(stream)
    }
}

// ============================================================================
// Dnode - Stream Setup
// ============================================================================

impl Dnode {
    /// Opens the TCP stream and applies the read/write timeout.
    fn open(&self, address: &str, target: &str) -> Result<TcpStream> {
        let stream = match self.options.connect_timeout {
            Some(timeout) => connect_with_timeout(target, timeout),
            None => TcpStream::connect(target),
        }
        .map_err(|e| Error::connect_failed(address, &e))?;

        if let Some(timeout) = self.options.timeout {
            stream
                .set_read_timeout(Some(timeout))
                .and_then(|()| stream.set_write_timeout(Some(timeout)))
                .map_err(|e| Error::connect_failed(address, &e))?;
        }

        Ok(stream)
    }
}

// ============================================================================
// Address Helpers
// ============================================================================

/// Formats `tcp://{host}:{port}`.
#[inline]
#[must_use]
pub fn tcp_address(host: &str, port: u16) -> String {
    format!("{TCP_SCHEME}://{host}:{port}")
}

/// Converts an address into the `host:port` form sockets resolve.
///
/// An unusable address fails like a socket that cannot be created.
fn socket_target(address: &str) -> Result<String> {
    if !address.contains("://") {
        return Ok(address.to_string());
    }

    let url = Url::parse(address)
        .map_err(|e| Error::socket_failed(address, 0, format!("invalid address: {e}")))?;

    if url.scheme() != TCP_SCHEME {
        return Err(Error::socket_failed(
            address,
            0,
            format!("unsupported scheme {}, expected {TCP_SCHEME}", url.scheme()),
        ));
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::socket_failed(address, 0, "missing host"))?;
    let port = url
        .port()
        .ok_or_else(|| Error::socket_failed(address, 0, "missing port"))?;

    Ok(format!("{host}:{port}"))
}

/// Opens a stream with a bounded connect, trying each resolved address once.
fn connect_with_timeout(target: &str, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_error = None;

    for addr in target.to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(ErrorKind::InvalidInput, "could not resolve to any address")
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{BufRead, BufReader, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread::{self, JoinHandle};

    use serde_json::{Value, json};

    const ECHO_METHODS: &str = "{\"method\":\"methods\",\"arguments\":[{\"echo\":\"[Function]\"}]}";

    /// Serves one connection like a dnode echo service:
    /// `echo(data, cb)` answers `cb(null, data)`.
    fn spawn_echo_peer() -> (SocketAddr, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));
            let mut writer = stream;

            writeln!(writer, "{ECHO_METHODS}").expect("write methods");

            let mut line = String::new();
            reader.read_line(&mut line).expect("read methods");
            assert_eq!(line, "{\"method\":\"methods\"}\n");

            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap_or(0) == 0 {
                    break;
                }

                let request: Value = serde_json::from_str(&line).expect("request json");
                let callback: u64 = request["callbacks"]
                    .as_object()
                    .and_then(|callbacks| callbacks.keys().next())
                    .and_then(|key| key.parse().ok())
                    .expect("callback id");
                let data = request["arguments"][0].clone();

                let response = json!({"method": callback, "arguments": [null, data]});
                writeln!(writer, "{response}").expect("write response");
            }
        });

        (addr, handle)
    }

    /// Completes the handshake, then hangs up.
    fn spawn_vanishing_peer() -> (SocketAddr, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));
            let mut writer = stream;

            writeln!(writer, "{ECHO_METHODS}").expect("write methods");
            let mut line = String::new();
            reader.read_line(&mut line).expect("read methods");
        });

        (addr, handle)
    }

    fn unused_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    }

    // ------------------------------------------------------------------------
    // Address Helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_tcp_address() {
        assert_eq!(tcp_address("127.0.0.1", 8080), "tcp://127.0.0.1:8080");
    }

    #[test]
    fn test_socket_target() {
        assert_eq!(socket_target("tcp://127.0.0.1:8080").expect("tcp"), "127.0.0.1:8080");
        assert_eq!(socket_target("localhost:7070").expect("bare"), "localhost:7070");
        assert_eq!(socket_target("tcp://[::1]:9000").expect("ipv6"), "[::1]:9000");
    }

    #[test]
    fn test_socket_target_rejects_other_schemes() {
        for address in ["udp://127.0.0.1:8080", "unix:///tmp/dnode.sock"] {
            let err = socket_target(address).expect_err("not tcp");
            assert!(err.is_io_error(), "{address}: {err:?}");
            assert!(
                err.message()
                    .starts_with(&format!("Can't create socket to {address}. Error: 0 "))
            );
        }
    }

    #[test]
    fn test_socket_target_requires_port() {
        let err = socket_target("tcp://127.0.0.1").expect_err("no port");
        assert!(err.is_io_error());
        assert_eq!(
            err.message(),
            "Can't create socket to tcp://127.0.0.1. Error: 0 missing port"
        );
    }

    #[test]
    fn test_unusable_address_is_io_error() {
        let err = Dnode::new()
            .connect_to_address("udp://127.0.0.1:1")
            .expect_err("udp");

        assert!(err.is_io_error());
        assert!(!err.is_local());
        assert_eq!(
            err.message(),
            "Can't create socket to udp://127.0.0.1:1. Error: 0 unsupported scheme udp, expected tcp"
        );
    }

    // ------------------------------------------------------------------------
    // Connecting
    // ------------------------------------------------------------------------

    #[test]
    fn test_echo_service() {
        let (addr, peer) = spawn_echo_peer();

        let mut connection = Dnode::new()
            .connect("127.0.0.1", addr.port())
            .expect("connect");
        assert_eq!(connection.available_methods(), ["echo"]);

        let response = connection.call("echo", &[json!("argument")]).expect("call");
        assert_eq!(response, vec![json!(null), json!("argument")]);

        let response = connection.call("echo", &[json!({"n": 1})]).expect("second call");
        assert_eq!(response, vec![json!(null), json!({"n": 1})]);

        connection.close();
        peer.join().expect("peer");
    }

    #[test]
    fn test_connect_with_timeouts() {
        let (addr, peer) = spawn_echo_peer();

        let dnode = Dnode::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(2))
            .build()
            .expect("options");
        let mut connection = dnode
            .connect_to_address(&format!("tcp://{addr}"))
            .expect("connect");

        let response = connection.call("echo", &[json!(5)]).expect("call");
        assert_eq!(response, vec![json!(null), json!(5)]);

        drop(connection);
        peer.join().expect("peer");
    }

    #[test]
    fn test_io_error_if_remote_not_available() {
        let (addr, peer) = spawn_vanishing_peer();

        let mut connection = Dnode::new()
            .connect("127.0.0.1", addr.port())
            .expect("connect");
        peer.join().expect("peer");

        let err = connection.call("echo", &[]).expect_err("remote gone");
        assert!(err.is_io_error());
        assert_eq!(err.message(), "Can't read response from remote");

        let err = connection.call("echo", &[]).expect_err("closed");
        assert!(matches!(err, Error::ConnectionClosed));
    }

    #[test]
    fn test_connection_closed_error() {
        let (addr, peer) = spawn_echo_peer();

        let mut connection = Dnode::new()
            .connect("127.0.0.1", addr.port())
            .expect("connect");
        connection.close();

        let err = connection.call0("echo").expect_err("closed");
        assert!(matches!(err, Error::ConnectionClosed));
        peer.join().expect("peer");
    }

    #[test]
    fn test_io_error_on_connect_to_stopped_service() {
        let port = unused_port();

        let err = Dnode::new()
            .connect("127.0.0.1", port)
            .expect_err("nothing listening");

        assert!(err.is_io_error());
        assert!(
            err.message()
                .starts_with(&format!("Can't create socket to tcp://127.0.0.1:{port}. Error: "))
        );
    }

    #[test]
    fn test_handshake_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let peer = thread::spawn(move || {
            let (_stream, _) = listener.accept().expect("accept");
            thread::sleep(Duration::from_millis(500));
        });

        let err = Dnode::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("options")
            .connect_to_address(&addr.to_string())
            .expect_err("silent peer");

        assert_eq!(err.message(), "Can't read method description from remote");
        peer.join().expect("peer");
    }

    #[test]
    fn test_invalid_options_rejected_before_connecting() {
        let dnode = Dnode::with_options(ConnectOptions::new().with_connect_timeout(Duration::ZERO));

        let err = dnode.connect("127.0.0.1", unused_port()).expect_err("zero timeout");
        assert!(matches!(err, Error::Config { .. }));
    }
}
