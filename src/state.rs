use std::path::PathBuf;

use crate::config::{FigureConfig, PlotConfig, SpectrumConfig};
use crate::data::annotate::{annotate, axis_bounds};
use crate::data::loader::load_xy;
use crate::data::model::{Annotation, AxisBounds, PeakLabel, Spectrum};
use crate::data::peaks::find_peaks;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// One stacked subplot, fully computed before the window opens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SpectrumPanel {
    pub title: String,
    pub spectrum: Spectrum,
    pub peaks: Vec<PeakLabel>,
    pub annotations: Vec<Annotation>,
    pub bounds: AxisBounds,
}

impl SpectrumPanel {
    /// Pick peaks and lay out labels for an already loaded spectrum.
    pub fn build(config: &SpectrumConfig, spectrum: Spectrum) -> Self {
        let peaks = find_peaks(
            &spectrum.x,
            &spectrum.y,
            config.peak_separation,
            config.peak_count,
        );
        let annotations = annotate(&spectrum, &peaks);
        let bounds = axis_bounds(&spectrum, config.x_limits);

        if spectrum.is_empty() {
            log::warn!("'{}': spectrum has no data points", config.title);
        } else if let Some([lo, hi]) = config.x_limits {
            let visible = spectrum.x.iter().filter(|&&x| x >= lo && x <= hi).count();
            if visible == 0 {
                log::warn!(
                    "'{}': no data points inside x limits [{lo}, {hi}]",
                    config.title
                );
            }
        }

        SpectrumPanel {
            title: config.title.clone(),
            spectrum,
            peaks,
            annotations,
            bounds,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// One entry per configured spectrum, top to bottom.
    pub panels: Vec<SpectrumPanel>,

    /// Styling shared by all panels.
    pub figure: FigureConfig,

    /// Screenshot target waiting for the next frame, if any.
    pub pending_screenshot: Option<PathBuf>,

    /// Close the window once the pending screenshot is written.
    pub exit_after_screenshot: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load every configured spectrum and pick its peaks.
    ///
    /// Loading is sequential and stops at the first bad file, so nothing is
    /// shown for a partially readable configuration.
    pub fn prepare(config: &PlotConfig) -> Result<Self, LoadError> {
        let panels = config
            .spectra
            .iter()
            .map(|sp| {
                let spectrum = load_xy(&sp.path)?;
                Ok(SpectrumPanel::build(sp, spectrum))
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(Self::from_panels(panels, config.figure.clone()))
    }

    pub fn from_panels(panels: Vec<SpectrumPanel>, figure: FigureConfig) -> Self {
        Self {
            panels,
            figure,
            pending_screenshot: None,
            exit_after_screenshot: false,
            status_message: None,
        }
    }

    /// Ask for a screenshot on the next frame.
    pub fn request_screenshot(&mut self, path: PathBuf, exit_after: bool) {
        self.pending_screenshot = Some(path);
        self.exit_after_screenshot = exit_after;
    }

    /// Total number of labelled peaks across all panels.
    pub fn peak_total(&self) -> usize {
        self.panels.iter().map(|p| p.peaks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_xy(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn spectrum_config(path: PathBuf, x_limits: Option<[f64; 2]>) -> SpectrumConfig {
        SpectrumConfig {
            path,
            title: "test".into(),
            x_limits,
            peak_separation: 0.5,
            peak_count: 2,
        }
    }

    #[test]
    fn test_prepare_loads_and_labels_each_spectrum() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_xy(dir.path(), "a.xy", "1 0\n2 5\n3 0\n4 0\n5 8\n6 0\n");
        let b = write_xy(dir.path(), "b.xy", "1 1\n2 1\n3 1\n");

        let config = PlotConfig {
            figure: FigureConfig::default(),
            spectra: vec![spectrum_config(a, None), spectrum_config(b, None)],
        };
        let state = AppState::prepare(&config).unwrap();

        assert_eq!(state.panels.len(), 2);
        assert_eq!(
            state.panels[0].peaks,
            vec![PeakLabel::new(5.0, 8.0), PeakLabel::new(2.0, 5.0)]
        );
        assert_eq!(state.panels[0].annotations[0].text, "5.00");
        assert!((state.panels[0].annotations[0].text_position[1] - 8.8).abs() < 1e-9);
        assert!(state.panels[1].peaks.is_empty());
        assert!(state.panels[1].annotations.is_empty());
        assert_eq!(state.peak_total(), 2);
    }

    #[test]
    fn test_limits_outside_data_prepare_fine() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_xy(dir.path(), "a.xy", "1 0\n2 5\n3 0\n");

        let config = PlotConfig {
            figure: FigureConfig::default(),
            spectra: vec![spectrum_config(a, Some([10.0, 20.0]))],
        };
        let state = AppState::prepare(&config).unwrap();
        assert_eq!(state.panels[0].bounds.x, [10.0, 20.0]);
        assert_eq!(state.panels[0].peaks.len(), 1);
    }

    #[test]
    fn test_malformed_file_aborts_before_any_panel() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_xy(dir.path(), "good.xy", "1 0\n2 5\n3 0\n");
        let bad = write_xy(dir.path(), "bad.xy", "1 0\n2 5 7\n3 0\n");

        let config = PlotConfig {
            figure: FigureConfig::default(),
            spectra: vec![spectrum_config(good, None), spectrum_config(bad, None)],
        };
        assert!(matches!(
            AppState::prepare(&config),
            Err(LoadError::TokenCount { line: 2, found: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlotConfig {
            figure: FigureConfig::default(),
            spectra: vec![spectrum_config(dir.path().join("missing.xy"), None)],
        };
        assert!(matches!(
            AppState::prepare(&config),
            Err(LoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_request_screenshot() {
        let mut state = AppState::from_panels(Vec::new(), FigureConfig::default());
        state.request_screenshot("out.png".into(), true);
        assert_eq!(state.pending_screenshot.as_deref(), Some(Path::new("out.png")));
        assert!(state.exit_after_screenshot);
    }
}
