//! Choosing the PDF: file dialog and drag & drop

use super::App;
use crate::constants::PDF_MIME;
use crate::session::lock;
use crate::types::SelectedFile;
use eframe::egui;
use std::path::Path;
use tracing::{debug, warn};

impl App {
    pub fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select a PDF")
            .add_filter("PDF", &["pdf"])
            .set_directory(self.settings.open_dir_or_default())
            .pick_file();
        match picked {
            Some(path) => self.select_path(&path),
            None => debug!("File dialog cancelled"),
        }
    }

    pub fn select_path(&mut self, path: &Path) {
        match SelectedFile::from_path(path) {
            Ok(file) => {
                if let Some(parent) = path.parent() {
                    self.settings.last_open_dir = Some(parent.to_string_lossy().to_string());
                }
                let mut session = lock(&self.session);
                if let Some(previous) = session.selected_file() {
                    debug!(previous = %previous.name, "Replacing selected file");
                }
                session.select_file(file);
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Cannot read selected file");
                self.show_toast(format!("Could not open {}", path.display()));
            }
        }
    }

    /// Takes the first dropped PDF; other files are ignored.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let pdf = dropped.iter().find_map(|f| {
            let path = f.path.as_deref()?;
            SelectedFile::looks_like_pdf(path, &f.mime).then(|| path.to_path_buf())
        });

        match pdf {
            Some(path) => {
                debug!(path = %path.display(), "PDF dropped onto window");
                self.select_path(&path);
            }
            None => {
                debug!(count = dropped.len(), "Dropped files contained no PDF");
                self.show_toast(format!("Only PDF files ({}) can be uploaded", PDF_MIME));
            }
        }
    }
}
