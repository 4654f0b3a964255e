//! Application constants and configuration

pub const APP_NAME: &str = "Book Q&A";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under the platform data dir
pub const DATA_DIR_NAME: &str = "Book QA";
pub const LOG_FILE_PREFIX: &str = "book-qa.log";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "BOOK_QA_BASE_URL";

pub const UPLOAD_PATH: &str = "/upload";
pub const ASK_PATH: &str = "/ask";
pub const STATUS_PATH: &str = "/";

pub const UPLOAD_FIELD: &str = "file";
pub const QUESTION_FIELD: &str = "question";
pub const PDF_MIME: &str = "application/pdf";

// User-facing strings
pub const UPLOAD_SUCCESS_PREFIX: &str = "✅";
pub const UPLOAD_FAILED: &str = "❌ Upload failed";
pub const ASK_FAILED: &str = "❌ Error fetching answer";
pub const MISSING_FILE_WARNING: &str = "Please select a PDF first!";
pub const QUESTION_PLACEHOLDER: &str = "e.g. What is the main theme of Chapter 2?";

pub const LABEL_UPLOAD: &str = "Upload";
pub const LABEL_UPLOADING: &str = "Uploading...";
pub const LABEL_ASK: &str = "Ask";
pub const LABEL_THINKING: &str = "Thinking...";
