//! View rendering (header, upload card, question card, answer panel)

use super::App;
use crate::constants::*;
use crate::session::{lock, SessionView};
use crate::theme;
use crate::ui::components;
use eframe::egui;
use egui_phosphor::regular as icons;

const QUESTION_INPUT_ID: &str = "question_input";

impl App {
    pub(crate) fn render_header(&mut self, ctx: &egui::Context, view: &SessionView) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_CARD)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    components::server_status_indicator(ui, &view.server_status);
                    ui.label(
                        egui::RichText::new(&self.base_url)
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_MUTED),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(theme::button(icons::GEAR))
                            .on_hover_text("Settings")
                            .clicked()
                        {
                            self.open_settings();
                        }
                        if ui
                            .add(theme::button(icons::ARROW_CLOCKWISE))
                            .on_hover_text("Check connection")
                            .clicked()
                        {
                            self.recheck_server_status(ctx);
                        }
                    });
                });
            });
    }

    pub(crate) fn render_content(&mut self, ctx: &egui::Context, view: &SessionView) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(theme::SPACING_XL);
                        ui.label(
                            egui::RichText::new(format!("{}  {} (Local RAG)", icons::BOOK_OPEN, APP_NAME))
                                .size(theme::FONT_TITLE)
                                .strong()
                                .color(theme::TEXT_PRIMARY),
                        );
                        ui.add_space(theme::SPACING_XL);
                    });

                    // Centered column capped at the content width
                    let width = ui.available_width().min(theme::CONTENT_MAX_WIDTH);
                    let side = ((ui.available_width() - width) / 2.0).max(0.0);
                    ui.horizontal(|ui| {
                        ui.add_space(side);
                        ui.vertical(|ui| {
                            ui.set_width(width);
                            self.render_upload_card(ui, view);
                            ui.add_space(theme::SPACING_XL);
                            self.render_question_card(ui, view);
                            ui.add_space(theme::SPACING_XL);
                        });
                    });
                });
        });
    }

    fn render_upload_card(&mut self, ui: &mut egui::Ui, view: &SessionView) {
        let ctx = ui.ctx().clone();
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            components::section_heading(ui, "Upload your book (PDF):");

            ui.horizontal(|ui| {
                if ui
                    .add(theme::button(format!("{}  Choose PDF", icons::FILE_PDF)))
                    .clicked()
                {
                    self.pick_file();
                }
                match &view.file_label {
                    Some(label) => ui.label(egui::RichText::new(label).color(theme::TEXT_SECONDARY)),
                    None => ui.label(egui::RichText::new("No file chosen").color(theme::TEXT_MUTED)),
                };
            });
            ui.add_space(theme::SPACING_LG);

            ui.horizontal(|ui| {
                let button = theme::button_action(
                    format!("{}  {}", icons::UPLOAD_SIMPLE, view.upload_label),
                    theme::BTN_UPLOAD,
                    view.upload_enabled,
                );
                if ui.add_enabled(view.upload_enabled, button).clicked() {
                    self.submit_upload(&ctx);
                }
                if !view.upload_enabled {
                    ui.add(egui::Spinner::new());
                }
            });

            if let Some(line) = &view.status_line {
                ui.add_space(theme::SPACING_LG);
                ui.label(
                    egui::RichText::new(line)
                        .strong()
                        .color(components::status_line_color(line)),
                );
                if let Some(caption) = &view.chunk_caption {
                    ui.label(
                        egui::RichText::new(caption)
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_MUTED),
                    );
                }
            }
        });
    }

    fn render_question_card(&mut self, ui: &mut egui::Ui, view: &SessionView) {
        let ctx = ui.ctx().clone();
        let input_id = egui::Id::new(QUESTION_INPUT_ID);
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            components::section_heading(ui, "Ask a question:");

            // Ctrl/Cmd+Enter submits; consume it before the text edit inserts a newline
            let shortcut = ui.memory(|m| m.has_focus(input_id))
                && ui.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Enter));

            {
                let mut session = lock(&self.session);
                ui.add(
                    egui::TextEdit::multiline(&mut session.question)
                        .id(input_id)
                        .desired_rows(3)
                        .desired_width(f32::INFINITY)
                        .margin(egui::Margin::same(8))
                        .hint_text(QUESTION_PLACEHOLDER),
                );
            }
            ui.add_space(theme::SPACING_LG);

            let clicked = ui
                .horizontal(|ui| {
                    let button = theme::button_action(
                        format!("{}  {}", icons::PAPER_PLANE_RIGHT, view.ask_label),
                        theme::BTN_ASK,
                        view.ask_enabled,
                    );
                    let clicked = ui
                        .add_enabled(view.ask_enabled, button)
                        .on_hover_text("Ctrl+Enter")
                        .clicked();
                    if !view.ask_enabled {
                        ui.add(egui::Spinner::new());
                    }
                    clicked
                })
                .inner;
            if clicked || (shortcut && view.ask_enabled) {
                self.submit_ask(&ctx);
            }

            if let Some(answer) = &view.answer {
                ui.add_space(theme::SPACING_LG);
                self.render_answer_panel(ui, answer, &view.context);
            }
        });
    }

    fn render_answer_panel(&mut self, ui: &mut egui::Ui, answer: &str, context: &[String]) {
        theme::answer_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Answer:")
                        .strong()
                        .color(theme::TEXT_SECONDARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add(theme::button(icons::COPY).small())
                        .on_hover_text("Copy answer")
                        .clicked()
                    {
                        ui.ctx().copy_text(answer.to_string());
                        self.show_toast("Answer copied");
                    }
                });
            });
            ui.add_space(theme::SPACING_SM);
            // Label keeps embedded line breaks
            ui.add(egui::Label::new(egui::RichText::new(answer).color(theme::TEXT_PRIMARY)).wrap());

            if !context.is_empty() {
                ui.add_space(theme::SPACING_MD);
                egui::CollapsingHeader::new(format!("Retrieved context ({})", context.len()))
                    .id_salt("answer_context")
                    .show(ui, |ui| {
                        for (i, passage) in context.iter().enumerate() {
                            ui.label(
                                egui::RichText::new(format!("Passage {}", i + 1))
                                    .size(theme::FONT_SMALL)
                                    .strong()
                                    .color(theme::TEXT_MUTED),
                            );
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(passage)
                                        .size(theme::FONT_SMALL)
                                        .color(theme::TEXT_SECONDARY),
                                )
                                .wrap(),
                            );
                            ui.add_space(theme::SPACING_SM);
                        }
                    });
            }
        });
    }

    /// Dim the window while files are dragged over it
    pub(crate) fn render_drop_overlay(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let screen = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_overlay"),
        ));
        painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(140));
        painter.text(
            screen.center(),
            egui::Align2::CENTER_CENTER,
            format!("{}  Drop a PDF to select it", icons::FILE_PDF),
            egui::FontId::proportional(20.0),
            egui::Color32::WHITE,
        );
    }
}
