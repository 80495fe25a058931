use eframe::egui::{self, Align2, Color32, FontId, RichText, TextStyle, Ui};
use egui_plot::{Arrows, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Text};

use crate::config::FigureConfig;
use crate::data::annotate::with_label_room;
use crate::state::{AppState, SpectrumPanel};

// ---------------------------------------------------------------------------
// Stacked spectra (central panel)
// ---------------------------------------------------------------------------

/// Render every spectrum as its own subplot, stacked top to bottom.
pub fn stacked_spectra(ui: &mut Ui, state: &AppState) {
    if state.panels.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No spectra configured");
        });
        return;
    }

    let n = state.panels.len() as f32;
    let spacing = ui.spacing().item_spacing.y;
    let row_height = ((ui.available_height() - spacing * (n - 1.0)) / n).max(state.figure.title_row_height() * 2.0);

    for (idx, panel) in state.panels.iter().enumerate() {
        spectrum_plot(ui, idx, panel, &state.figure, row_height);
    }
}

/// One subplot: centred title, black trace, x axis only, labelled peaks.
fn spectrum_plot(ui: &mut Ui, idx: usize, panel: &SpectrumPanel, figure: &FigureConfig, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(&panel.title)
                .size(figure.title_font_size)
                .color(Color32::BLACK),
        );
    });

    ui.scope(|ui: &mut Ui| {
        // egui_plot draws tick labels with the body style.
        let tick_font = FontId::proportional(figure.tick_font_size);
        let style = ui.style_mut();
        style.text_styles.insert(TextStyle::Body, tick_font.clone());
        style.text_styles.insert(TextStyle::Small, tick_font);

        let title_height = figure.title_row_height();
        let bounds = with_label_room(
            panel.bounds,
            &panel.annotations,
            figure.label_line_height() as f64,
            figure.plot_area_height(height) as f64,
        );
        let label_size = figure.axis_label_font_size;

        Plot::new(("spectrum_plot", idx))
            .height((height - title_height).max(title_height))
            .show_axes([true, false])
            .show_grid(false)
            .show_background(false)
            .show_x(false)
            .show_y(false)
            .x_axis_label(RichText::new("m/z").size(label_size))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(bounds.min(), bounds.max()));

                let points: PlotPoints = panel.spectrum.points().collect();
                plot_ui.line(
                    Line::new(points)
                        .color(Color32::BLACK)
                        .width(figure.line_width),
                );

                for ann in &panel.annotations {
                    plot_ui.arrows(
                        Arrows::new(
                            PlotPoints::new(vec![ann.text_position]),
                            PlotPoints::new(vec![[ann.peak.x, ann.peak.y]]),
                        )
                        .color(Color32::BLACK)
                        .tip_length(4.0),
                    );

                    let [tx, ty] = ann.text_position;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(tx, ty),
                            RichText::new(&ann.text).size(label_size),
                        )
                        .color(Color32::BLACK)
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    });
}

/// Install a custom proportional font (e.g. Arial) ahead of egui's defaults.
pub fn install_font(ctx: &egui::Context, name: &str, bytes: Vec<u8>) {
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        name.to_owned(),
        std::sync::Arc::new(egui::FontData::from_owned(bytes)),
    );
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, name.to_owned());
    ctx.set_fonts(fonts);
}
