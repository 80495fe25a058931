//! Plot configuration: one record per spectrum plus figure-wide styling.
//!
//! Either loaded from a file (TOML or JSON, picked by extension):
//!
//! ```toml
//! [figure]
//! width_cm = 10.0
//! height_per_spectrum_cm = 2.5
//!
//! [[spectra]]
//! path = "measured.xy"
//! title = "Mass spectrum - Measured"
//! x_limits = [1000.0, 2000.0]
//! peak_separation = 100.0
//! peak_count = 3
//! ```
//!
//! or assembled from the parallel `--file/--title/...` command-line lists.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CM_PER_INCH: f32 = 2.54;

/// Room for the top bar on top of the stacked plots, in points.
const TOP_BAR_HEIGHT: f32 = 28.0;

/// Line height of rendered text relative to its font size.
const LINE_HEIGHT_FACTOR: f32 = 1.4;

/// Gap between an annotation's text and the plot's top edge, in points.
const LABEL_CLEARANCE: f32 = 2.0;

/// Padding egui_plot puts around the x-axis ticks and label, in points.
const X_AXIS_PADDING: f32 = 6.0;

/// Smallest window `window_size` will suggest.
pub const MIN_WINDOW_SIZE: [f32; 2] = [320.0, 160.0];

// ---------------------------------------------------------------------------
// Per-spectrum settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumConfig {
    /// `.xy` file to load.
    pub path: PathBuf,

    /// Subplot title.
    #[serde(default)]
    pub title: String,

    /// Optional `[min, max]` m/z range; `None` fits the data.
    #[serde(default)]
    pub x_limits: Option<[f64; 2]>,

    /// Minimum m/z distance between labelled peaks.
    pub peak_separation: f64,

    /// How many peaks to label at most.
    pub peak_count: usize,
}

// ---------------------------------------------------------------------------
// Figure-wide styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub window_title: String,
    pub width_cm: f32,
    pub height_per_spectrum_cm: f32,
    /// Pixels per inch used to turn the centimetre sizes into window points.
    pub dpi: f32,
    pub title_font_size: f32,
    pub axis_label_font_size: f32,
    pub tick_font_size: f32,
    pub line_width: f32,
    /// TTF/OTF file installed as the proportional font (e.g. Arial).
    pub font_file: Option<PathBuf>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            window_title: "mz-stack".to_string(),
            width_cm: 10.0,
            height_per_spectrum_cm: 2.5,
            dpi: 100.0,
            title_font_size: 8.0,
            axis_label_font_size: 6.0,
            tick_font_size: 6.0,
            line_width: 0.5,
            font_file: None,
        }
    }
}

impl FigureConfig {
    fn cm_to_points(&self, cm: f32) -> f32 {
        cm / CM_PER_INCH * self.dpi
    }

    /// Nominal height of one stacked row (title + plot), in points.
    pub fn row_height(&self) -> f32 {
        self.cm_to_points(self.height_per_spectrum_cm)
    }

    /// Height of the centred title above each plot.
    pub fn title_row_height(&self) -> f32 {
        self.title_font_size * LINE_HEIGHT_FACTOR + 4.0
    }

    /// Height of one peak label plus its clearance.
    pub fn label_line_height(&self) -> f32 {
        self.axis_label_font_size * LINE_HEIGHT_FACTOR + LABEL_CLEARANCE
    }

    /// Space below the data area taken by the x-axis ticks and "m/z" label.
    pub fn x_axis_height(&self) -> f32 {
        (self.tick_font_size + self.axis_label_font_size) * LINE_HEIGHT_FACTOR + X_AXIS_PADDING
    }

    /// Height of the data area inside a row `row_height` points tall.
    pub fn plot_area_height(&self, row_height: f32) -> f32 {
        (row_height - self.title_row_height() - self.x_axis_height()).max(1.0)
    }

    /// Initial window size for `n_spectra` stacked plots.
    pub fn window_size(&self, n_spectra: usize) -> [f32; 2] {
        let width = self.cm_to_points(self.width_cm);
        let height =
            self.row_height() * n_spectra.max(1) as f32 + TOP_BAR_HEIGHT;
        [width.max(MIN_WINDOW_SIZE[0]), height.max(MIN_WINDOW_SIZE[1])]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("width_cm", self.width_cm),
            ("height_per_spectrum_cm", self.height_per_spectrum_cm),
            ("dpi", self.dpi),
            ("title_font_size", self.title_font_size),
            ("axis_label_font_size", self.axis_label_font_size),
            ("tick_font_size", self.tick_font_size),
            ("line_width", self.line_width),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidFigure {
                    field,
                    value: value as f64,
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Root configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default)]
    pub spectra: Vec<SpectrumConfig>,
}

impl PlotConfig {
    /// Load from a `.toml` or `.json` file and validate.
    ///
    /// Relative spectrum paths are resolved against the config file's
    /// directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = match ext.as_str() {
            "toml" => Self::from_toml_str(&content)?,
            "json" => Self::from_json_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without validating.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse JSON without validating.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Zip parallel per-spectrum lists into records.
    ///
    /// Every list must have one entry per file; a short or long list is an
    /// error rather than a default-filled gap.
    pub fn from_parallel_lists(
        files: Vec<PathBuf>,
        x_limits: Vec<Option<[f64; 2]>>,
        titles: Vec<String>,
        separations: Vec<f64>,
        counts: Vec<usize>,
        figure: FigureConfig,
    ) -> Result<Self, ConfigError> {
        let expected = files.len();
        let lengths = [
            ("x limits", x_limits.len()),
            ("titles", titles.len()),
            ("peak separations", separations.len()),
            ("peak counts", counts.len()),
        ];
        for (field, found) in lengths {
            if found != expected {
                return Err(ConfigError::LengthMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }

        let spectra = files
            .into_iter()
            .zip(x_limits)
            .zip(titles)
            .zip(separations)
            .zip(counts)
            .map(
                |((((path, x_limits), title), peak_separation), peak_count)| SpectrumConfig {
                    path,
                    title,
                    x_limits,
                    peak_separation,
                    peak_count,
                },
            )
            .collect();

        let config = Self { figure, spectra };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spectra.is_empty() {
            return Err(ConfigError::NoSpectra);
        }
        self.figure.validate()?;

        for (index, sp) in self.spectra.iter().enumerate() {
            if sp.peak_count == 0 {
                return Err(ConfigError::InvalidPeakCount {
                    index,
                    title: sp.title.clone(),
                });
            }
            if !(sp.peak_separation.is_finite() && sp.peak_separation >= 0.0) {
                return Err(ConfigError::InvalidSeparation {
                    index,
                    title: sp.title.clone(),
                    value: sp.peak_separation,
                });
            }
            if let Some([min, max]) = sp.x_limits {
                if !(min.is_finite() && max.is_finite() && min < max) {
                    return Err(ConfigError::InvalidXLimits {
                        index,
                        title: sp.title.clone(),
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for sp in &mut self.spectra {
            if sp.path.is_relative() {
                sp.path = base.join(&sp.path);
            }
        }
        if let Some(font) = &mut self.figure.font_file {
            if font.is_relative() {
                *font = base.join(&*font);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Command-line x-limit syntax
// ---------------------------------------------------------------------------

/// One `--xlim` value: `MIN:MAX`, `MIN,MAX`, or `auto`/`none`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XLimits(pub Option<[f64; 2]>);

impl FromStr for XLimits {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") || trimmed.eq_ignore_ascii_case("none") {
            return Ok(XLimits(None));
        }

        let (lo, hi) = trimmed
            .split_once(':')
            .or_else(|| trimmed.split_once(','))
            .ok_or_else(|| ConfigError::XLimitsSyntax(s.to_string()))?;

        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::XLimitsSyntax(s.to_string()))
        };
        Ok(XLimits(Some([parse(lo)?, parse(hi)?])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn spectrum(path: &str, count: usize) -> SpectrumConfig {
        SpectrumConfig {
            path: path.into(),
            title: path.to_string(),
            x_limits: None,
            peak_separation: 1.0,
            peak_count: count,
        }
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
            [figure]
            width_cm = 12.0

            [[spectra]]
            path = "measured.xy"
            title = "Mass spectrum - Measured"
            x_limits = [1000.0, 2000.0]
            peak_separation = 100.0
            peak_count = 3

            [[spectra]]
            path = "deconvoluted.xy"
            peak_separation = 3.0
            peak_count = 1
        "#;

        let config = PlotConfig::from_toml_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.figure.width_cm, 12.0);
        assert_eq!(config.figure.height_per_spectrum_cm, 2.5);
        assert_eq!(config.spectra.len(), 2);
        assert_eq!(config.spectra[0].x_limits, Some([1000.0, 2000.0]));
        assert_eq!(config.spectra[1].x_limits, None);
        assert_eq!(config.spectra[1].title, "");
    }

    #[test]
    fn test_parse_json_config() {
        let json = r#"{
            "spectra": [
                {"path": "a.xy", "title": "A", "x_limits": [14900, 15000],
                 "peak_separation": 4.0, "peak_count": 1}
            ]
        }"#;
        let config = PlotConfig::from_json_str(json).unwrap();
        assert_eq!(config.figure, FigureConfig::default());
        assert_eq!(config.spectra[0].x_limits, Some([14900.0, 15000.0]));
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("plot.toml");
        let mut f = std::fs::File::create(&cfg_path).unwrap();
        writeln!(
            f,
            "[[spectra]]\npath = \"data/a.xy\"\npeak_separation = 1.0\npeak_count = 2"
        )
        .unwrap();

        let config = PlotConfig::from_file(&cfg_path).unwrap();
        assert_eq!(config.spectra[0].path, dir.path().join("data/a.xy"));
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("plot.yaml");
        std::fs::write(&cfg_path, "spectra: []").unwrap();
        assert!(matches!(
            PlotConfig::from_file(&cfg_path),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_parallel_lists_zip_in_order() {
        let config = PlotConfig::from_parallel_lists(
            vec!["a.xy".into(), "b.xy".into()],
            vec![Some([1000.0, 2000.0]), None],
            vec!["A".into(), "B".into()],
            vec![100.0, 3.0],
            vec![3, 1],
            FigureConfig::default(),
        )
        .unwrap();

        assert_eq!(config.spectra[0].title, "A");
        assert_eq!(config.spectra[0].peak_count, 3);
        assert_eq!(config.spectra[1].path, PathBuf::from("b.xy"));
        assert_eq!(config.spectra[1].peak_separation, 3.0);
        assert_eq!(config.spectra[1].x_limits, None);
    }

    #[test]
    fn test_parallel_lists_length_mismatch() {
        let err = PlotConfig::from_parallel_lists(
            vec!["a.xy".into(), "b.xy".into()],
            vec![None, None],
            vec!["A".into()],
            vec![1.0, 1.0],
            vec![1, 1],
            FigureConfig::default(),
        )
        .unwrap_err();

        match err {
            ConfigError::LengthMismatch {
                field,
                expected,
                found,
            } => {
                assert_eq!(field, "titles");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        let mut config = PlotConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::NoSpectra)));

        config.spectra.push(spectrum("a.xy", 0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPeakCount { index: 0, .. })
        ));

        config.spectra[0].peak_count = 1;
        config.spectra[0].peak_separation = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSeparation { .. })
        ));

        config.spectra[0].peak_separation = 0.0;
        config.spectra[0].x_limits = Some([20.0, 10.0]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidXLimits { .. })
        ));

        config.spectra[0].x_limits = Some([10.0, 20.0]);
        config.validate().unwrap();

        config.figure.dpi = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidFigure { field: "dpi", .. })
        ));
    }

    #[test]
    fn test_window_size_scales_with_spectra() {
        let figure = FigureConfig {
            width_cm: 25.4,
            height_per_spectrum_cm: 2.54,
            dpi: 100.0,
            ..Default::default()
        };
        let [w, h] = figure.window_size(4);
        assert!((w - 1000.0).abs() < 1e-3);
        assert!((h - (400.0 + TOP_BAR_HEIGHT)).abs() < 1e-3);

        // Tiny figures are clamped to something usable.
        let tiny = FigureConfig {
            width_cm: 0.1,
            ..Default::default()
        };
        assert_eq!(tiny.window_size(1)[0], MIN_WINDOW_SIZE[0]);
    }

    #[test]
    fn test_plot_area_excludes_title_and_axis() {
        let figure = FigureConfig::default();
        let row = figure.row_height();
        let area = figure.plot_area_height(row);
        assert!(area > 0.0 && area < row);
        assert!((area + figure.title_row_height() + figure.x_axis_height() - row).abs() < 1e-3);
        assert_eq!(figure.plot_area_height(1.0), 1.0);
    }

    #[test]
    fn test_xlimits_syntax() {
        assert_eq!("1000:2000".parse::<XLimits>().unwrap(), XLimits(Some([1000.0, 2000.0])));
        assert_eq!(" 5000 , 20000 ".parse::<XLimits>().unwrap(), XLimits(Some([5000.0, 20000.0])));
        assert_eq!("auto".parse::<XLimits>().unwrap(), XLimits(None));
        assert_eq!("None".parse::<XLimits>().unwrap(), XLimits(None));
        assert!("1000".parse::<XLimits>().is_err());
        assert!("a:b".parse::<XLimits>().is_err());
    }
}
