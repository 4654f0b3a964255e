//! HTTP client for the question-answering service
//!
//! The service exposes `POST /upload` (multipart `file`), `POST /ask`
//! (multipart `question`) and `GET /`. Every response is expected to be JSON
//! of a known shape; anything else is reported as an [`ApiError`].

use crate::constants::*;
use crate::types::{AskReply, SelectedFile, StatusReply, UploadReply};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url '{0}': expected an absolute http(s) url")]
    InvalidBaseUrl(String),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Operations the UI needs from the remote service.
#[async_trait]
pub trait QaBackend: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply, ApiError>;
    async fn ask(&self, question: &str) -> Result<AskReply, ApiError>;
    async fn status(&self) -> Result<StatusReply, ApiError>;
}

/// Validate a user or env supplied base url and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        reqwest::Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl(raw.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ApiError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

#[derive(Clone)]
pub struct QaClient {
    http: reqwest::Client,
    base_url: String,
}

impl QaClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, url = %response.url(), "Service returned error status");
            return Err(ApiError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl QaBackend for QaClient {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadReply, ApiError> {
        // Streamed from disk; the length is taken at open time
        let handle = tokio::fs::File::open(&file.path).await?;
        let len = handle.metadata().await?.len();
        debug!(name = %file.name, bytes = len, "Uploading document");

        let body = reqwest::Body::wrap_stream(ReaderStream::new(handle));
        let part = Part::stream_with_length(body, len)
            .file_name(file.name.clone())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn ask(&self, question: &str) -> Result<AskReply, ApiError> {
        debug!(bytes = question.len(), "Sending question");
        let form = Form::new().text(QUESTION_FIELD, question.to_string());
        let response = self
            .http
            .post(self.endpoint(ASK_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn status(&self) -> Result<StatusReply, ApiError> {
        let response = self.http.get(self.endpoint(STATUS_PATH)).send().await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = find(&buf, b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            match content_length {
                Some(len) if buf.len() - (end + 4) >= len => break,
                Some(_) => continue,
                None if head.contains("transfer-encoding: chunked") => {
                    if buf.ends_with(b"0\r\n\r\n") {
                        break;
                    }
                }
                None => break,
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Accept a single connection, record the raw request and answer with `body`.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        (format!("http://{}", addr), handle)
    }

    fn pdf_fixture(dir: &tempfile::TempDir) -> SelectedFile {
        let path = dir.path().join("book.pdf");
        std::fs::write(&path, b"%PDF-1.4 chapter one").unwrap();
        SelectedFile::from_path(&path).unwrap()
    }

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url(" http://localhost:8000/ ").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("https://qa.example.com/api//").unwrap(),
            "https://qa.example.com/api"
        );
    }

    #[test]
    fn normalize_rejects_non_http_urls() {
        for raw in ["", "localhost:8000", "ftp://host", "not a url"] {
            assert!(
                matches!(normalize_base_url(raw), Err(ApiError::InvalidBaseUrl(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn upload_sends_file_field() {
        let dir = tempfile::tempdir().unwrap();
        let file = pdf_fixture(&dir);
        let (base, server) =
            serve_once("200 OK", r#"{"message":"File 'book.pdf' processed successfully!","chunks":4}"#).await;

        let client = QaClient::new(&base, None).unwrap();
        let reply = client.upload(&file).await.unwrap();
        assert_eq!(reply.message, "File 'book.pdf' processed successfully!");
        assert_eq!(reply.chunks, Some(4));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /upload HTTP/1.1"));
        assert!(request.contains(r#"name="file""#));
        assert!(request.contains(r#"filename="book.pdf""#));
        assert!(request.contains("application/pdf"));
        assert!(request.contains("%PDF-1.4 chapter one"));
    }

    #[tokio::test]
    async fn large_upload_is_sent_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.pdf");
        let mut content = b"%PDF-1.4 ".to_vec();
        content.extend(std::iter::repeat(b'x').take(300_000));
        content.extend_from_slice(b" %%EOF");
        std::fs::write(&path, &content).unwrap();
        let file = SelectedFile::from_path(&path).unwrap();

        let (base, server) = serve_once("200 OK", r#"{"message":"ok"}"#).await;
        let client = QaClient::new(&base, None).unwrap();
        client.upload(&file).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.contains(r#"filename="long.pdf""#));
        assert!(request.contains(&"x".repeat(300_000)));
        assert!(request.contains(" %%EOF"));
    }

    #[tokio::test]
    async fn ask_sends_question_field_and_keeps_newlines() {
        let (base, server) = serve_once("200 OK", r#"{"answer":"line one\nline two","context":["p1"]}"#).await;

        let client = QaClient::new(&base, None).unwrap();
        let reply = client.ask("What is chapter 2 about?").await.unwrap();
        assert_eq!(reply.answer, "line one\nline two");
        assert_eq!(reply.context, vec!["p1".to_string()]);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /ask HTTP/1.1"));
        assert!(request.contains(r#"name="question""#));
        assert!(request.contains("What is chapter 2 about?"));
    }

    #[tokio::test]
    async fn status_probe_gets_root() {
        let (base, server) = serve_once("200 OK", r#"{"message":"Hello, FastAPI is running!"}"#).await;

        let client = QaClient::new(&format!("{base}/"), None).unwrap();
        let reply = client.status().await.unwrap();
        assert_eq!(reply.message, "Hello, FastAPI is running!");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET / HTTP/1.1"));
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;

        let client = QaClient::new(&base, None).unwrap();
        let err = client.ask("anything").await.unwrap_err();
        assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 500));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn missing_field_is_decode_error() {
        let (base, server) = serve_once("200 OK", r#"{"chunks":3}"#).await;

        let dir = tempfile::tempdir().unwrap();
        let client = QaClient::new(&base, None).unwrap();
        let err = client.upload(&pdf_fixture(&dir)).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "Internal error").await;

        let client = QaClient::new(&base, None).unwrap();
        let err = client.ask("anything").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = QaClient::new(&format!("http://{}", addr), None).unwrap();
        let err = client.ask("anything").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn unreadable_file_fails_before_sending() {
        let dir = tempfile::tempdir().unwrap();
        let file = SelectedFile {
            path: dir.path().join("gone.pdf"),
            name: "gone.pdf".into(),
            size: 0,
        };
        let client = QaClient::new("http://127.0.0.1:9", None).unwrap();
        let err = client.upload(&file).await.unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }
}
