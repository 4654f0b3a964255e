//! Modal dialogs (missing file warning, settings) and the toast

use super::App;
use crate::constants::*;
use crate::session::{lock, SessionView};
use crate::settings::BaseUrlSource;
use crate::theme;
use crate::utils::get_logs_dir;
use eframe::egui;
use egui_phosphor::regular as icons;
use tracing::warn;

#[derive(Clone, Copy, PartialEq, Eq)]
enum WarningAction {
    None,
    Dismiss,
    ChooseFile,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SettingsAction {
    None,
    Save,
    Cancel,
    OpenLogs,
}

impl App {
    pub(crate) fn render_missing_file_modal(&mut self, ctx: &egui::Context, view: &SessionView) {
        let Some(message) = view.warning else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("missing_file_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(100))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_width(300.0);
            let mut action = WarningAction::None;
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(icons::WARNING)
                        .size(32.0)
                        .color(theme::STATUS_WARNING),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new(message).size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_LG);
                ui.horizontal(|ui| {
                    if ui
                        .add(theme::button_action(
                            format!("{}  Choose PDF", icons::FILE_PDF),
                            theme::BTN_UPLOAD,
                            true,
                        ))
                        .clicked()
                    {
                        action = WarningAction::ChooseFile;
                    }
                    if ui.add(theme::button("OK")).clicked() {
                        action = WarningAction::Dismiss;
                    }
                });
            });
            action
        });

        let action = if modal_response.should_close() {
            WarningAction::Dismiss
        } else {
            modal_response.inner
        };
        match action {
            WarningAction::None => {}
            WarningAction::Dismiss => lock(&self.session).dismiss_warning(),
            WarningAction::ChooseFile => {
                lock(&self.session).dismiss_warning();
                self.pick_file();
            }
        }
    }

    pub(crate) fn open_settings(&mut self) {
        self.base_url_draft = self
            .settings
            .base_url
            .clone()
            .unwrap_or_else(|| self.base_url.clone());
        self.settings_error = None;
        self.show_settings = true;
    }

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let env_override = self.base_url_source == BaseUrlSource::Environment;
        let modal = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_width(380.0);
            let mut action = SettingsAction::None;

            ui.label(egui::RichText::new("Settings").size(theme::FONT_HEADING).strong());
            ui.add_space(theme::SPACING_LG);

            ui.label(egui::RichText::new("Service URL").color(theme::TEXT_SECONDARY));
            let edit = ui.add(
                egui::TextEdit::singleline(&mut self.base_url_draft)
                    .desired_width(f32::INFINITY)
                    .hint_text(DEFAULT_BASE_URL),
            );
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = SettingsAction::Save;
            }
            if env_override {
                ui.label(
                    egui::RichText::new(format!("{} is set and takes precedence over this value.", BASE_URL_ENV))
                        .size(theme::FONT_SMALL)
                        .color(theme::STATUS_WARNING),
                );
            }
            if let Some(err) = &self.settings_error {
                ui.label(
                    egui::RichText::new(err)
                        .size(theme::FONT_SMALL)
                        .color(theme::STATUS_ERROR),
                );
            }

            ui.add_space(theme::SPACING_XL);
            ui.horizontal(|ui| {
                if ui
                    .add(theme::button(format!("{}  Open log folder", icons::FOLDER_OPEN)))
                    .clicked()
                {
                    action = SettingsAction::OpenLogs;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(theme::button_action(
                            format!("{}  Save", icons::CHECK),
                            theme::BTN_UPLOAD,
                            true,
                        ))
                        .clicked()
                    {
                        action = SettingsAction::Save;
                    }
                    if ui.add(theme::button("Cancel")).clicked() {
                        action = SettingsAction::Cancel;
                    }
                });
            });
            action
        });

        let action = if modal_response.should_close() {
            SettingsAction::Cancel
        } else {
            modal_response.inner
        };
        match action {
            SettingsAction::None => {}
            SettingsAction::Cancel => self.show_settings = false,
            SettingsAction::OpenLogs => {
                let logs = get_logs_dir();
                if let Err(e) = open::that(&logs) {
                    warn!(error = %e, path = %logs.display(), "Failed to open log folder");
                    self.show_toast("Could not open the log folder");
                }
            }
            SettingsAction::Save => {
                let draft = self.base_url_draft.clone();
                match self.apply_base_url(ctx, &draft) {
                    Ok(()) => {
                        self.show_settings = false;
                        self.show_toast("Service URL saved");
                    }
                    Err(e) => self.settings_error = Some(e.to_string()),
                }
            }
        }
    }

    /// Bottom-right toast: visible for 3s, then fades out. Hover pauses the timer.
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        let visible_duration = 3.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 16.0;

        let screen = ctx.screen_rect();
        let toast_pos = egui::pos2(screen.right() - margin, screen.bottom() - margin);
        let elapsed = self
            .toast_start
            .map(|t| t.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        let alpha = if elapsed > visible_duration {
            ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1f, 0x29, 0x37, (235.0 * alpha) as u8))
                    .corner_radius(theme::RADIUS_DEFAULT)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&msg).color(
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8),
                        ));
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}
