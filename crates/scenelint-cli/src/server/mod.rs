//! Upload-and-validate HTTP server
//!
//! `GET /` serves an upload form, `POST /upload` validates the uploaded scene
//! and answers with the report. Every other route is a 404.

mod http;
mod multipart;

use http::{discard, read_request, write_response, HttpRequest, HttpResponse, RequestError};
use log::{error, info, warn};
use scenelint_rules::{OutputFormat, ValidationReport, ValidationSession};
use std::io::Write;
use std::net::{Shutdown, TcpListener, TcpStream};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Most unread request bytes swallowed after rejecting an oversize body
const DRAIN_LIMIT: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub max_body_bytes: usize,
    pub io_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 32 * 1024 * 1024,
            io_timeout: Duration::from_secs(30),
        }
    }
}

/// Accept connections forever, one thread per connection
pub fn serve(
    listener: TcpListener,
    session: Arc<ValidationSession>,
    config: ServerConfig,
) -> std::io::Result<()> {
    let config = Arc::new(config);
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let session = Arc::clone(&session);
                let config = Arc::clone(&config);
                std::thread::spawn(move || {
                    if let Err(e) = handle_connection(stream, &session, &config) {
                        warn!("Connection error: {}", e);
                    }
                });
            }
            Err(e) => warn!("Failed to accept connection: {}", e),
        }
    }
    Ok(())
}

fn handle_connection(
    mut stream: TcpStream,
    session: &ValidationSession,
    config: &ServerConfig,
) -> std::io::Result<()> {
    let _ = stream.set_read_timeout(Some(config.io_timeout));
    let _ = stream.set_write_timeout(Some(config.io_timeout));

    let response = match read_request(&mut stream, config.max_body_bytes) {
        Ok(Some(request)) => {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handle_request(&request, session)));
            outcome.unwrap_or_else(|_| {
                error!("Error processing {} {}", request.method, request.path);
                HttpResponse::error("500 Internal Server Error", "Internal server error")
            })
        }
        Ok(None) => return Ok(()),
        Err(RequestError::TooLarge(size)) => {
            warn!("Rejected request body of {} bytes", size);
            let response =
                HttpResponse::error("413 Payload Too Large", "Uploaded file is too large");
            write_response(&mut stream, &response)?;
            // Let the client see the 413 instead of a reset
            let _ = stream.shutdown(Shutdown::Write);
            let _ = discard(&mut stream, DRAIN_LIMIT);
            return Ok(());
        }
        Err(RequestError::Io(e)) => {
            warn!("Failed to read request: {}", e);
            HttpResponse::error("400 Bad Request", "Malformed request")
        }
    };

    write_response(&mut stream, &response)
}

/// Route a request to its handler
pub(crate) fn handle_request(request: &HttpRequest, session: &ValidationSession) -> HttpResponse {
    let path = request.path.split('?').next().unwrap_or("/");
    match (request.method.as_str(), path) {
        ("GET", "/") => HttpResponse::new(
            "200 OK",
            "text/html; charset=utf-8",
            upload_form(&session.parsers().supported_extensions()),
        ),
        ("HEAD", "/") => HttpResponse::new("200 OK", "text/html; charset=utf-8", Vec::new()),
        ("POST", "/upload") => handle_upload(request, session),
        _ => HttpResponse::error("404 Not Found", "File not found"),
    }
}

fn handle_upload(request: &HttpRequest, session: &ValidationSession) -> HttpResponse {
    let content_type = request.header("content-type").unwrap_or("");
    let parts = match multipart::parse(content_type, &request.body) {
        Ok(parts) => parts,
        Err(e) => {
            warn!("Rejected upload: {}", e);
            return HttpResponse::error("400 Bad Request", "No file was uploaded");
        }
    };

    let Some(file) = parts
        .iter()
        .find(|p| p.name == "file" && !p.data.is_empty())
    else {
        return HttpResponse::error("400 Bad Request", "No file was uploaded");
    };

    let format = parts
        .iter()
        .find(|p| p.name == "format")
        .and_then(|p| p.text())
        .and_then(|s| s.parse::<OutputFormat>().ok())
        .unwrap_or(OutputFormat::Html);

    let label = upload_label(file.filename.as_deref());
    info!("Validating uploaded file: {}", label);

    match validate_upload(session, &label, &file.data) {
        Ok(report) => HttpResponse::new("200 OK", format.content_type(), report.render(format)),
        Err(e) => {
            error!("Error processing upload {}: {}", label, e);
            HttpResponse::error(
                "500 Internal Server Error",
                &format!("Internal server error: {}", e),
            )
        }
    }
}

/// Keep only the final path component of a client-supplied file name
fn upload_label(filename: Option<&str>) -> String {
    filename
        .map(|f| f.rsplit(['/', '\\']).next().unwrap_or(f).trim())
        .filter(|f| !f.is_empty())
        .unwrap_or("upload")
        .to_string()
}

/// Store the upload in a temp file that keeps its extension, then validate it
///
/// The temp file is removed when it goes out of scope.
fn validate_upload(
    session: &ValidationSession,
    label: &str,
    data: &[u8],
) -> std::io::Result<ValidationReport> {
    let suffix = Path::new(label)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let mut file = tempfile::Builder::new()
        .prefix("scenelint-upload-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(data)?;
    file.flush()?;

    Ok(session.validate_labeled(file.path(), label))
}

fn upload_form(extensions: &[String]) -> String {
    UPLOAD_FORM.replace("{extensions}", &scenelint_rules::html::escape(&extensions.join(", ")))
}

const UPLOAD_FORM: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Scene Validator</title>
<style>
body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
h1 { color: #333; }
form { margin: 20px 0; padding: 20px; background-color: #f5f5f5; border-radius: 5px; }
.form-group { margin-bottom: 15px; }
label { display: block; margin-bottom: 5px; font-weight: bold; }
input[type="submit"] { padding: 10px 15px; background-color: #4CAF50; color: white; border: none; cursor: pointer; }
.info { margin: 20px 0; padding: 10px; background-color: #e7f3fe; border-left: 6px solid #2196F3; }
</style>
</head>
<body>
<h1>Scene Validator</h1>
<div class="info">
<p>Upload a scene file to validate it against production guidelines.</p>
<p>Supported file formats: {extensions}</p>
</div>
<form action="/upload" method="post" enctype="multipart/form-data">
<div class="form-group">
<label for="file">Scene File:</label>
<input type="file" name="file" id="file" required>
</div>
<div class="form-group">
<label for="format">Output Format:</label>
<select name="format" id="format">
<option value="html">HTML</option>
<option value="json">JSON</option>
<option value="text">Text</option>
</select>
</div>
<input type="submit" value="Validate">
</form>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use scenelint_rules::{ReportDocument, RuleSet};
    use scenelint_scene::ParserRegistry;
    use std::io::Read;

    const BOUNDARY: &str = "XscenelintX";

    const SCENE: &str = "[hierarchy.root]\ncamera1 = {}\n\n[[elements]]\nname = \"camera1\"\ntype = \"camera\"\npath = \"root|camera1\"\n";

    fn session() -> ValidationSession {
        ValidationSession::new(
            Arc::new(RuleSet::new().with_required_elements(["camera", "lighting"])),
            ParserRegistry::with_defaults(),
        )
    }

    fn multipart_body(filename: &str, content: &str, format: Option<&str>) -> Vec<u8> {
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\r\n{c}\r\n",
            b = BOUNDARY,
            f = filename,
            c = content
        );
        if let Some(format) = format {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"format\"\r\n\r\n{}\r\n",
                BOUNDARY, format
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body.into_bytes()
    }

    fn upload(body: Vec<u8>) -> HttpRequest {
        HttpRequest {
            method: "POST".into(),
            path: "/upload".into(),
            headers: vec![(
                "Content-Type".into(),
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )],
            body,
        }
    }

    fn get(path: &str) -> HttpRequest {
        HttpRequest {
            method: "GET".into(),
            path: path.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_lists_extensions() {
        let response = handle_request(&get("/"), &session());
        assert_eq!(response.status_code(), 200);
        let html = String::from_utf8(response.body).unwrap();
        assert!(html.contains("action=\"/upload\""));
        assert!(html.contains("Supported file formats: .toml, .json, .yaml, .yml"));
    }

    #[test]
    fn test_head_has_no_body() {
        let mut request = get("/");
        request.method = "HEAD".into();
        let response = handle_request(&request, &session());
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.content_type, "text/html; charset=utf-8");
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_unknown_routes_are_404() {
        assert_eq!(handle_request(&get("/upload"), &session()).status_code(), 404);
        assert_eq!(handle_request(&get("/favicon.ico"), &session()).status_code(), 404);
        let mut request = upload(Vec::new());
        request.path = "/submit".into();
        assert_eq!(handle_request(&request, &session()).status_code(), 404);
    }

    #[test]
    fn test_upload_json_report() {
        let response = handle_request(
            &upload(multipart_body("shot010.toml", SCENE, Some("json"))),
            &session(),
        );
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.content_type, "application/json");

        let doc: ReportDocument = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(doc.scene_file, "shot010.toml");
        assert!(!doc.is_valid);
        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].message, "Missing required element type: lighting");
    }

    #[test]
    fn test_upload_defaults_to_html() {
        let response = handle_request(&upload(multipart_body("shot.toml", SCENE, None)), &session());
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.content_type, "text/html; charset=utf-8");
        assert!(String::from_utf8(response.body).unwrap().contains("FAILED"));
    }

    #[test]
    fn test_upload_text_report() {
        let response = handle_request(
            &upload(multipart_body("shot.toml", SCENE, Some("text"))),
            &session(),
        );
        assert_eq!(response.content_type, "text/plain; charset=utf-8");
        let text = String::from_utf8(response.body).unwrap();
        assert!(text.starts_with("Validation FAILED for shot.toml\n"));
    }

    #[test]
    fn test_upload_unsupported_format() {
        let response = handle_request(
            &upload(multipart_body("shot.blend", "BLENDER-v300", Some("json"))),
            &session(),
        );
        assert_eq!(response.status_code(), 200);
        let doc: ReportDocument = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(doc.errors.len(), 1);
        assert_eq!(doc.errors[0].message, "Unsupported file format: .blend");
    }

    #[test]
    fn test_upload_without_file_is_400() {
        let response = handle_request(&upload(multipart_body("shot.toml", "", None)), &session());
        assert_eq!(response.status_code(), 400);

        let mut request = upload(b"plain".to_vec());
        request.headers.clear();
        assert_eq!(handle_request(&request, &session()).status_code(), 400);
    }

    #[test]
    fn test_upload_label() {
        assert_eq!(upload_label(Some("C:\\scenes\\shot.toml")), "shot.toml");
        assert_eq!(upload_label(Some("../../etc/shot.json")), "shot.json");
        assert_eq!(upload_label(Some("")), "upload");
        assert_eq!(upload_label(None), "upload");
    }

    #[test]
    fn test_oversize_upload_gets_413() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let config = ServerConfig {
            max_body_bytes: 1024,
            ..ServerConfig::default()
        };
        std::thread::spawn(move || serve(listener, Arc::new(session()), config));

        let body = vec![b'x'; 64 * 1024];
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "POST /upload HTTP/1.1\r\nHost: localhost\r\nContent-Type: multipart/form-data; boundary={}\r\nContent-Length: {}\r\n\r\n",
            BOUNDARY,
            body.len()
        )
        .unwrap();
        stream.write_all(&body).unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        assert!(response.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
        assert!(response.ends_with("Uploaded file is too large"));
    }

    #[test]
    fn test_serve_over_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let session = Arc::new(session());
        std::thread::spawn(move || serve(listener, session, ServerConfig::default()));

        let body = multipart_body("shot.toml", SCENE, Some("json"));
        let mut stream = TcpStream::connect(addr).unwrap();
        write!(
            stream,
            "POST /upload HTTP/1.1\r\nHost: localhost\r\nContent-Type: multipart/form-data; boundary={}\r\nContent-Length: {}\r\n\r\n",
            BOUNDARY,
            body.len()
        )
        .unwrap();
        stream.write_all(&body).unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: application/json\r\n"));
        assert!(response.contains("\"is_valid\": false"));
    }
}
