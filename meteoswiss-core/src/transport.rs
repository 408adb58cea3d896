use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// Blocking HTTPS GET into a caller-provided bounded buffer.
///
/// Implementations write at most `buf.len()` bytes and return the number of
/// bytes written; anything past the buffer capacity is dropped. A `None`
/// timeout means the request may block indefinitely.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, buf: &mut [u8], timeout: Option<Duration>) -> Result<usize>;
}

/// `reqwest`-backed transport.
///
/// The timeout is applied per request, so one client can serve callers on
/// separate threads as long as each brings its own buffer.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        // Disable the client-wide default timeout; the per-request timeout is
        // the only one the caller controls.
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, buf: &mut [u8], timeout: Option<Duration>) -> Result<usize> {
        let mut request = self.http.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let res = request
            .send()
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("Request to {url} failed with status {status}");
        }

        // Stream the body straight into the buffer; an oversized response is
        // dropped unread past the capacity, never held in memory.
        let n = read_capped(res, buf).context("Failed to read response body")?;
        if n == buf.len() {
            debug!(
                capacity = buf.len(),
                "response filled the buffer; any remainder was dropped"
            );
        }

        Ok(n)
    }
}

/// Read from `reader` until `buf` is full or the stream ends; returns the
/// number of bytes written. Never reads past the buffer capacity.
fn read_capped<R: Read>(mut reader: R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut len = 0;
    while len < buf.len() {
        let n = reader.read(&mut buf[len..])?;
        if n == 0 {
            break;
        }
        len += n;
    }
    Ok(len)
}
