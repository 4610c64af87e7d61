//! `multipart/form-data` body parsing

use scenelint_core::{Result, SceneLintError};

/// One form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

impl Part {
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// Extract the boundary parameter from a `Content-Type` header
pub fn boundary(content_type: &str) -> Option<&str> {
    let mut params = content_type.split(';');
    let mime = params.next()?.trim();
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }
    params
        .filter_map(|p| p.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("boundary"))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|b| !b.is_empty())
}

/// Split a multipart body into its parts
pub fn parse(content_type: &str, body: &[u8]) -> Result<Vec<Part>> {
    let boundary = boundary(content_type)
        .ok_or_else(|| SceneLintError::Http("expected multipart/form-data with a boundary".into()))?;
    let delimiter = format!("--{}", boundary).into_bytes();
    let inner_delimiter = [b"\r\n".as_slice(), &delimiter].concat();

    let first = find(body, &delimiter, 0)
        .ok_or_else(|| SceneLintError::Http("multipart body has no boundary".into()))?;
    let mut pos = first + delimiter.len();
    let mut parts = Vec::new();

    loop {
        if body[pos..].starts_with(b"--") {
            break;
        }
        let start = if body[pos..].starts_with(b"\r\n") {
            pos + 2
        } else {
            pos
        };
        let end = find(body, &inner_delimiter, start)
            .ok_or_else(|| SceneLintError::Http("unterminated multipart body".into()))?;
        parts.push(parse_part(&body[start..end])?);
        pos = end + inner_delimiter.len();
    }

    Ok(parts)
}

fn parse_part(raw: &[u8]) -> Result<Part> {
    let header_end = find(raw, b"\r\n\r\n", 0)
        .ok_or_else(|| SceneLintError::Http("multipart part without headers".into()))?;
    let headers = String::from_utf8_lossy(&raw[..header_end]);
    let data = raw[header_end + 4..].to_vec();

    let disposition = headers
        .split("\r\n")
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-disposition"))
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| SceneLintError::Http("multipart part without Content-Disposition".into()))?;

    let mut name = None;
    let mut filename = None;
    for param in disposition.split(';').skip(1) {
        if let Some((key, value)) = param.trim().split_once('=') {
            let value = value.trim().trim_matches('"').to_string();
            match key.trim().to_ascii_lowercase().as_str() {
                "name" => name = Some(value),
                "filename" => filename = Some(value),
                _ => {}
            }
        }
    }

    let name =
        name.ok_or_else(|| SceneLintError::Http("multipart part without a field name".into()))?;
    Ok(Part {
        name,
        filename,
        data,
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
