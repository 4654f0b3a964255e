//! Dispatching upload, ask and status requests onto the runtime

use super::App;
use crate::api::{ApiError, QaClient};
use crate::session;
use eframe::egui;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

impl App {
    fn spawn_flow(&self, ctx: &egui::Context, task: impl Future<Output = ()> + Send + 'static) {
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            task.await;
            ctx.request_repaint();
        });
    }

    pub fn submit_upload(&mut self, ctx: &egui::Context) {
        if let Some(task) = session::start_upload(&self.session, &self.backend) {
            self.spawn_flow(ctx, task);
        }
    }

    pub fn submit_ask(&mut self, ctx: &egui::Context) {
        if let Some(task) = session::start_ask(&self.session, &self.backend) {
            self.spawn_flow(ctx, task);
        }
    }

    pub fn check_server_status(&mut self, ctx: &egui::Context) {
        if let Some(task) = session::start_status_check(&self.session, &self.backend) {
            self.spawn_flow(ctx, task);
        }
    }

    /// Re-probe now, dropping the result of any probe still in flight.
    pub fn recheck_server_status(&mut self, ctx: &egui::Context) {
        let task = session::restart_status_check(&self.session, &self.backend);
        self.spawn_flow(ctx, task);
    }

    /// Point the client at a new service url typed in the settings modal.
    /// Requests already in flight finish against the old client.
    pub fn apply_base_url(&mut self, ctx: &egui::Context, raw: &str) -> Result<(), ApiError> {
        let mut updated = self.settings.clone();
        updated.set_base_url(raw)?;
        let (base_url, source) = updated.resolve_base_url();
        let client = QaClient::new(&base_url, updated.request_timeout())?;

        info!(base_url = %base_url, source = ?source, "Service endpoint changed");
        self.settings = updated;
        self.backend = Arc::new(client);
        self.base_url = base_url;
        self.base_url_source = source;
        self.save_settings();
        self.recheck_server_status(ctx);
        Ok(())
    }
}
