use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, ColorImage, RichText, Ui};

use crate::error::PlotError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Save PNG…").clicked() {
                if let Some(path) = save_file_dialog() {
                    state.request_screenshot(path, false);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} spectra, {} peaks labelled",
            state.panels.len(),
            state.peak_total()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog / screenshot output
// ---------------------------------------------------------------------------

pub fn save_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save spectra as PNG")
        .add_filter("PNG image", &["png"])
        .set_file_name("spectra.png")
        .save_file()
}

/// Write an egui screenshot to disk; the format follows the extension.
pub fn write_screenshot(image: &ColorImage, path: &Path) -> Result<(), PlotError> {
    let [width, height] = image.size;
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, image.as_raw().to_vec())
        .ok_or(PlotError::ScreenshotBuffer { width, height })?;

    buffer.save(path).map_err(|source| PlotError::Screenshot {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Saved {}x{} screenshot to {}", width, height, path.display());
    Ok(())
}
