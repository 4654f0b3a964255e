//! UI-agnostic session state and the upload / ask flows
//!
//! A flow is split in two halves. `begin_*` runs synchronously on the UI
//! thread before anything is dispatched; it validates input, raises the
//! flow's loading flag and clears stale output. `finish_*` runs when the
//! request resolves and always lowers the flag again. `start_*` ties the two
//! together around a [`QaBackend`] call and hands back the future to spawn.
//!
//! The egui layer only ever draws [`SessionView`], which is derived from the
//! state by [`QaSession::view`].

use crate::api::{ApiError, QaBackend};
use crate::constants::*;
use crate::types::{AskReply, SelectedFile, ServerStatus, StatusReply, UploadReply};
use crate::utils::format_bytes;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Why a flow did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    NoFile,
    BlankQuestion,
    InFlight,
}

#[derive(Debug, Default)]
pub struct QaSession {
    selected_file: Option<SelectedFile>,
    /// Bound live to the question textarea
    pub question: String,
    answer: String,
    answer_context: Vec<String>,
    upload_message: String,
    upload_chunks: Option<u64>,
    uploading: bool,
    asking: bool,
    warning: Option<&'static str>,
    server_status: ServerStatus,
    status_generation: u64,
}

/// Everything the window needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub file_label: Option<String>,
    pub upload_label: &'static str,
    pub upload_enabled: bool,
    pub status_line: Option<String>,
    pub chunk_caption: Option<String>,
    pub ask_label: &'static str,
    pub ask_enabled: bool,
    pub answer: Option<String>,
    pub context: Vec<String>,
    pub warning: Option<&'static str>,
    pub server_status: ServerStatus,
}

/// Lock the shared session, recovering from a poisoned mutex.
pub fn lock(session: &Mutex<QaSession>) -> MutexGuard<'_, QaSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

impl QaSession {
    pub fn select_file(&mut self, file: SelectedFile) {
        debug!(name = %file.name, size = file.size, "File selected");
        self.selected_file = Some(file);
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    pub fn begin_upload(&mut self) -> Result<SelectedFile, Rejected> {
        if self.uploading {
            return Err(Rejected::InFlight);
        }
        let Some(file) = self.selected_file.clone() else {
            self.warning = Some(MISSING_FILE_WARNING);
            return Err(Rejected::NoFile);
        };
        self.uploading = true;
        self.upload_message.clear();
        self.upload_chunks = None;
        Ok(file)
    }

    pub fn finish_upload(&mut self, result: Result<UploadReply, ApiError>) {
        match result {
            Ok(reply) => {
                info!(message = %reply.message, chunks = ?reply.chunks, "Upload complete");
                self.upload_message = format!("{} {}", UPLOAD_SUCCESS_PREFIX, reply.message);
                self.upload_chunks = reply.chunks;
            }
            Err(e) => {
                warn!(error = %e, "Upload failed");
                self.upload_message = UPLOAD_FAILED.to_string();
            }
        }
        self.uploading = false;
    }

    /// Returns the question exactly as typed; only the emptiness check trims.
    pub fn begin_ask(&mut self) -> Result<String, Rejected> {
        if self.asking {
            return Err(Rejected::InFlight);
        }
        if self.question.trim().is_empty() {
            return Err(Rejected::BlankQuestion);
        }
        self.asking = true;
        self.answer.clear();
        self.answer_context.clear();
        Ok(self.question.clone())
    }

    pub fn finish_ask(&mut self, result: Result<AskReply, ApiError>) {
        match result {
            Ok(reply) => {
                info!(bytes = reply.answer.len(), passages = reply.context.len(), "Answer received");
                self.answer = reply.answer;
                self.answer_context = reply.context;
            }
            Err(e) => {
                warn!(error = %e, "Ask failed");
                self.answer = ASK_FAILED.to_string();
            }
        }
        self.asking = false;
    }

    /// Returns the probe's generation, or `None` when a probe is already running.
    pub fn begin_status_check(&mut self) -> Option<u64> {
        if self.server_status == ServerStatus::Checking {
            return None;
        }
        Some(self.restart_status_check())
    }

    /// Starts a new probe even if one is running. The running probe's result
    /// will be discarded when it arrives.
    pub fn restart_status_check(&mut self) -> u64 {
        self.status_generation += 1;
        self.server_status = ServerStatus::Checking;
        self.status_generation
    }

    pub fn finish_status_check(&mut self, generation: u64, result: Result<StatusReply, ApiError>) {
        if generation != self.status_generation {
            debug!(generation, current = self.status_generation, "Discarding superseded status result");
            return;
        }
        self.server_status = match result {
            Ok(reply) => ServerStatus::Online(reply.message),
            Err(e) => {
                debug!(error = %e, "Service unreachable");
                ServerStatus::Offline
            }
        };
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            file_label: self
                .selected_file
                .as_ref()
                .map(|f| format!("{} ({})", f.name, format_bytes(f.size))),
            upload_label: if self.uploading { LABEL_UPLOADING } else { LABEL_UPLOAD },
            upload_enabled: !self.uploading,
            status_line: (!self.upload_message.is_empty()).then(|| self.upload_message.clone()),
            chunk_caption: self
                .upload_chunks
                .map(|n| format!("{} chunk{} indexed", n, if n == 1 { "" } else { "s" })),
            ask_label: if self.asking { LABEL_THINKING } else { LABEL_ASK },
            ask_enabled: !self.asking,
            answer: (!self.answer.is_empty()).then(|| self.answer.clone()),
            context: self.answer_context.clone(),
            warning: self.warning,
            server_status: self.server_status.clone(),
        }
    }
}

/// Begin an upload. When accepted, the returned future performs the request
/// and completes the flow; it must be spawned or awaited.
pub fn start_upload(
    session: &Arc<Mutex<QaSession>>,
    backend: &Arc<dyn QaBackend>,
) -> Option<impl Future<Output = ()> + Send + 'static> {
    let file = match lock(session).begin_upload() {
        Ok(file) => file,
        Err(rejected) => {
            debug!(?rejected, "Upload not started");
            return None;
        }
    };
    info!(name = %file.name, size = file.size, "Upload started");

    let session = Arc::clone(session);
    let backend = Arc::clone(backend);
    Some(async move {
        let result = backend.upload(&file).await;
        lock(&session).finish_upload(result);
    })
}

/// Begin an ask. Same contract as [`start_upload`].
pub fn start_ask(
    session: &Arc<Mutex<QaSession>>,
    backend: &Arc<dyn QaBackend>,
) -> Option<impl Future<Output = ()> + Send + 'static> {
    let question = match lock(session).begin_ask() {
        Ok(question) => question,
        Err(rejected) => {
            debug!(?rejected, "Ask not started");
            return None;
        }
    };
    info!("Question submitted");

    let session = Arc::clone(session);
    let backend = Arc::clone(backend);
    Some(async move {
        let result = backend.ask(&question).await;
        lock(&session).finish_ask(result);
    })
}

/// Probe the service unless a probe is already running.
pub fn start_status_check(
    session: &Arc<Mutex<QaSession>>,
    backend: &Arc<dyn QaBackend>,
) -> Option<impl Future<Output = ()> + Send + 'static> {
    let generation = lock(session).begin_status_check()?;
    Some(status_task(session, backend, generation))
}

/// Probe the service now. A probe still in flight is superseded, so a hung
/// request cannot pin the status at `Checking` or overwrite a newer result.
pub fn restart_status_check(
    session: &Arc<Mutex<QaSession>>,
    backend: &Arc<dyn QaBackend>,
) -> impl Future<Output = ()> + Send + 'static {
    let generation = lock(session).restart_status_check();
    status_task(session, backend, generation)
}

fn status_task(
    session: &Arc<Mutex<QaSession>>,
    backend: &Arc<dyn QaBackend>,
    generation: u64,
) -> impl Future<Output = ()> + Send + 'static {
    debug!(generation, "Status check started");
    let session = Arc::clone(session);
    let backend = Arc::clone(backend);
    async move {
        let result = backend.status().await;
        lock(&session).finish_status_check(generation, result);
    }
}
