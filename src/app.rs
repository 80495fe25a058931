use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MzStackApp {
    pub state: AppState,
    frames_drawn: u64,
    screenshot_in_flight: bool,
}

impl MzStackApp {
    /// `font` is `(family name, font file bytes)` for a custom typeface.
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState, font: Option<(String, Vec<u8>)>) -> Self {
        // Black-on-white, like a printed figure.
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        if let Some((name, bytes)) = font {
            plot::install_font(&cc.egui_ctx, &name, bytes);
        }

        Self {
            state,
            frames_drawn: 0,
            screenshot_in_flight: false,
        }
    }

    /// Drive a pending screenshot: request it once a frame has been drawn,
    /// then write it out when the backend hands the image back.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        let shot = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });

        if let Some(image) = shot {
            self.screenshot_in_flight = false;
            let Some(path) = self.state.pending_screenshot.take() else {
                return;
            };

            match panels::write_screenshot(&image, &path) {
                Ok(()) => {
                    self.state.status_message = None;
                }
                Err(e) => {
                    log::error!("{e:#}");
                    self.state.status_message = Some(format!("Error: {e}"));
                }
            }

            if self.state.exit_after_screenshot {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            return;
        }

        if self.state.pending_screenshot.is_some() && !self.screenshot_in_flight && self.frames_drawn > 0 {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_in_flight = true;
        }
        if self.state.pending_screenshot.is_some() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for MzStackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: stacked spectra ----
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                plot::stacked_spectra(ui, &self.state);
            });

        self.handle_screenshot(ctx);
        self.frames_drawn += 1;
    }
}
