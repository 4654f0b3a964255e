//! Reusable UI components

use crate::constants::{UPLOAD_FAILED, UPLOAD_SUCCESS_PREFIX};
use crate::theme;
use crate::types::ServerStatus;
use eframe::egui;

/// Text colour for the upload status line
pub fn status_line_color(line: &str) -> egui::Color32 {
    if line == UPLOAD_FAILED {
        theme::STATUS_ERROR
    } else if line.starts_with(UPLOAD_SUCCESS_PREFIX) {
        theme::STATUS_SUCCESS
    } else {
        theme::TEXT_SECONDARY
    }
}

/// Dot colour and short label for the server probe
pub fn server_status_badge(status: &ServerStatus) -> (egui::Color32, &'static str) {
    match status {
        ServerStatus::Unknown => (theme::TEXT_MUTED, "Not checked"),
        ServerStatus::Checking => (theme::STATUS_WARNING, "Checking..."),
        ServerStatus::Online(_) => (theme::STATUS_SUCCESS, "Online"),
        ServerStatus::Offline => (theme::STATUS_ERROR, "Offline"),
    }
}

/// Coloured dot followed by the status label. Hover shows the server greeting.
pub fn server_status_indicator(ui: &mut egui::Ui, status: &ServerStatus) -> egui::Response {
    let (color, label) = server_status_badge(status);
    let response = ui
        .horizontal(|ui| {
            let size = 10.0;
            let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
            ui.painter().circle_filled(rect.center(), size / 2.0, color);
            ui.label(
                egui::RichText::new(label)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_SECONDARY),
            );
        })
        .response;

    match status {
        ServerStatus::Online(message) => response.on_hover_text(message.as_str()),
        ServerStatus::Offline => response.on_hover_text("The service did not answer on /"),
        _ => response,
    }
}

pub fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_HEADING)
            .strong()
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(theme::SPACING_MD);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_colors() {
        assert_eq!(status_line_color("✅ Indexed 10 pages"), theme::STATUS_SUCCESS);
        assert_eq!(status_line_color("❌ Upload failed"), theme::STATUS_ERROR);
        assert_eq!(status_line_color("something else"), theme::TEXT_SECONDARY);
    }

    #[test]
    fn badge_labels() {
        assert_eq!(server_status_badge(&ServerStatus::Unknown).1, "Not checked");
        assert_eq!(server_status_badge(&ServerStatus::Online("hi".into())).1, "Online");
        assert_eq!(server_status_badge(&ServerStatus::Offline).0, theme::STATUS_ERROR);
    }
}
