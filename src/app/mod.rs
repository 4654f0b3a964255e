//! App module - contains the main application state and logic

mod files;
mod modals;
mod requests;
mod views;

use crate::api::{QaBackend, QaClient};
use crate::session::QaSession;
use crate::settings::{BaseUrlSource, Settings};
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) session: Arc<Mutex<QaSession>>,
    pub(crate) backend: Arc<dyn QaBackend>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    // Service endpoint in use
    pub(crate) base_url: String,
    pub(crate) base_url_source: BaseUrlSource,
    pub(crate) status_check_started: bool,
    // Settings modal state
    pub(crate) show_settings: bool,
    pub(crate) base_url_draft: String,
    pub(crate) settings_error: Option<String>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        cc.egui_ctx.set_theme(egui::Theme::Light);

        // Phosphor icons as a fallback for the default proportional font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let (base_url, base_url_source) = settings.resolve_base_url();
        let client = QaClient::new(&base_url, settings.request_timeout())?;
        info!(base_url = %base_url, source = ?base_url_source, "Service endpoint configured");

        Ok(Self {
            session: Arc::new(Mutex::new(QaSession::default())),
            backend: Arc::new(client),
            runtime: tokio::runtime::Runtime::new()?,
            base_url_draft: base_url.clone(),
            base_url,
            base_url_source,
            status_check_started: false,
            show_settings: false,
            settings_error: None,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            settings,
            data_dir,
        })
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }
}
