//! Minimal HTTP/1.1 request reading and response writing

use std::io::{Read, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request body of {0} bytes exceeds the upload limit")]
    TooLarge(usize),
}

#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: &'static str, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    pub fn error(status: &'static str, message: &str) -> Self {
        Self::new(status, "text/plain; charset=utf-8", message.as_bytes())
    }

    pub fn status_code(&self) -> u16 {
        self.status
            .split_whitespace()
            .next()
            .and_then(|code| code.parse().ok())
            .unwrap_or(500)
    }
}

const MAX_HEADER_BYTES: usize = 16 * 1024;

/// Read one request: headers, then exactly `Content-Length` body bytes
///
/// Returns `Ok(None)` when the peer closed the connection without sending
/// anything.
pub fn read_request<S: Read>(
    stream: &mut S,
    max_body_bytes: usize,
) -> Result<Option<HttpRequest>, RequestError> {
    let mut buf = [0u8; 8192];
    let mut data = Vec::<u8>::new();
    let header_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        if data.len() > MAX_HEADER_BYTES {
            return Err(RequestError::TooLarge(data.len()));
        }
        let read = stream.read(&mut buf)?;
        if read == 0 {
            if data.is_empty() {
                return Ok(None);
            }
            break data.len();
        }
        data.extend_from_slice(&buf[..read]);
    };

    let header_text = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let mut lines = header_text.split("\r\n");
    let Some(request_line) = lines.next() else {
        return Ok(None);
    };
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("/").to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    if content_length > max_body_bytes {
        return Err(RequestError::TooLarge(content_length));
    }

    let mut body = data[header_end..].to_vec();
    if content_length > body.len() {
        let start = body.len();
        body.resize(content_length, 0);
        stream.read_exact(&mut body[start..])?;
    } else {
        body.truncate(content_length);
    }

    Ok(Some(HttpRequest {
        method,
        path,
        headers,
        body,
    }))
}

/// Read and drop up to `limit` bytes, stopping early at end of stream
pub fn discard<S: Read>(stream: &mut S, limit: u64) -> std::io::Result<u64> {
    std::io::copy(&mut stream.take(limit), &mut std::io::sink())
}

pub fn write_response<S: Write>(stream: &mut S, response: &HttpResponse) -> std::io::Result<()> {
    let mut headers = String::new();
    headers.push_str("HTTP/1.1 ");
    headers.push_str(response.status);
    headers.push_str("\r\n");
    headers.push_str("Content-Type: ");
    headers.push_str(response.content_type);
    headers.push_str("\r\n");
    headers.push_str("Cache-Control: no-store\r\n");
    headers.push_str("X-Content-Type-Options: nosniff\r\n");
    headers.push_str("Connection: close\r\n");
    headers.push_str("Content-Length: ");
    headers.push_str(&response.body.len().to_string());
    headers.push_str("\r\n\r\n");

    stream.write_all(headers.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()
}
