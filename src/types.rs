//! Common types and data structures

use crate::constants::PDF_MIME;
use std::path::{Path, PathBuf};

/// A PDF the user picked. Bytes are read when the upload is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document.pdf".to_string());
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
        })
    }

    /// Advisory check mirroring the file dialog filter
    pub fn looks_like_pdf(path: &Path, mime: &str) -> bool {
        mime == PDF_MIME
            || path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
    }
}

/// Result of the service probe on `/`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServerStatus {
    #[default]
    Unknown,
    Checking,
    Online(String),
    Offline,
}

/// Server reply to `/upload`
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UploadReply {
    pub message: String,
    #[serde(default)]
    pub chunks: Option<u64>,
}

/// Server reply to `/ask`
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct AskReply {
    pub answer: String,
    #[serde(default)]
    pub context: Vec<String>,
}

/// Server reply to `/`
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct StatusReply {
    pub message: String,
}
