/*!
 * Gopher connection transport
 *
 * One TCP dialog at a time: connect with retry and backoff, send a
 * selector, read either a line-oriented text response or raw bytes to EOF.
 * A [`Connection`] covers exactly one request; the socket is shut down when
 * it is dropped, on every exit path.
 */

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use crate::error::{GopherdexError, Result};

/// How long to wait for a TCP connect to complete
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(2000);

/// How long a single socket read may block once connected
pub const READ_TIMEOUT: Duration = Duration::from_millis(5000);

/// Maximum connect attempts before giving up
pub const MAX_CONNECT_ATTEMPTS: u32 = 2;

/// Hard cap on the accumulated size of a text response
pub const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// A live connection to a Gopher server, good for one request/response
/// dialog.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    /// Establish a TCP connection to `host:port`.
    ///
    /// Retries up to [`MAX_CONNECT_ATTEMPTS`] times, sleeping
    /// `2^attempt * 100` ms between attempts. The last error is surfaced if
    /// every attempt fails.
    pub fn open(host: &str, port: u16) -> Result<Self> {
        let mut last_error: Option<io::Error> = None;

        for attempt in 0..MAX_CONNECT_ATTEMPTS {
            match Self::try_connect(host, port) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(READ_TIMEOUT))?;
                    return Ok(Self { stream });
                }
                Err(err) => {
                    last_error = Some(err);
                    if attempt + 1 < MAX_CONNECT_ATTEMPTS {
                        thread::sleep(Duration::from_millis((1u64 << attempt) * 100));
                    }
                }
            }
        }

        Err(GopherdexError::Connect {
            host: host.to_string(),
            port,
            source: last_error
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "no connect attempt made")),
        })
    }

    fn try_connect(host: &str, port: u16) -> io::Result<TcpStream> {
        let mut last_error = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT) {
                Ok(stream) => return Ok(stream),
                Err(err) => last_error = Some(err),
            }
        }
        Err(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "hostname resolved to no addresses")
        }))
    }

    /// Check whether a server accepts connections. Only the connect phase is
    /// performed; the connection is closed immediately.
    pub fn probe(host: &str, port: u16) -> bool {
        Self::open(host, port).is_ok()
    }

    /// Send `selector` and read the response as UTF-8 lines until EOF.
    ///
    /// Returns the lines rejoined with `\n`. The accumulated response is
    /// capped at [`MAX_RESPONSE_SIZE`]; exceeding it fails the request and
    /// discards the bytes already read.
    pub fn send_request(&mut self, selector: &str) -> Result<String> {
        self.write_selector(selector)?;

        let reader = BufReader::new(&self.stream);
        let mut lines = Vec::new();
        let mut total = 0usize;

        for line in reader.lines() {
            let line = line.map_err(map_read_error)?;
            if total + line.len() > MAX_RESPONSE_SIZE {
                return Err(GopherdexError::ResponseTooLarge(MAX_RESPONSE_SIZE));
            }
            total += line.len();
            lines.push(line);
        }

        Ok(lines.join("\n"))
    }

    /// Send `selector` and read the raw response bytes until EOF.
    ///
    /// No size cap applies here; the upper bound is whatever the server
    /// sends before closing the connection.
    pub fn read_binary(&mut self, selector: &str) -> Result<Vec<u8>> {
        self.write_selector(selector)?;

        let mut buffer = Vec::new();
        self.stream
            .read_to_end(&mut buffer)
            .map_err(map_read_error)?;

        Ok(buffer)
    }

    fn write_selector(&mut self, selector: &str) -> Result<()> {
        self.stream.write_all(selector.as_bytes())?;
        self.stream.write_all(b"\r\n")?;
        self.stream.flush()?;
        Ok(())
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

fn map_read_error(err: io::Error) -> GopherdexError {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            GopherdexError::ReadTimeout(READ_TIMEOUT.as_millis() as u64)
        }
        _ => GopherdexError::Io(err),
    }
}
