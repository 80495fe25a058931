use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading an `.xy` spectrum.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("spectrum file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}, line {line}: expected 2 values, found {found}")]
    TokenCount {
        source_name: String,
        line: usize,
        found: usize,
    },

    #[error("{source_name}, line {line}: '{token}' is not a number")]
    InvalidNumber {
        source_name: String,
        line: usize,
        token: String,
    },
}

/// Failure while building or validating a [`crate::config::PlotConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config format '.{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("TOML config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no spectra configured")]
    NoSpectra,

    #[error("{field}: expected {expected} entries (one per file), found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("spectrum {index} ('{title}'): peak count must be at least 1")]
    InvalidPeakCount { index: usize, title: String },

    #[error("spectrum {index} ('{title}'): peak separation {value} must be finite and >= 0")]
    InvalidSeparation {
        index: usize,
        title: String,
        value: f64,
    },

    #[error("spectrum {index} ('{title}'): x limits [{min}, {max}] must be finite with min < max")]
    InvalidXLimits {
        index: usize,
        title: String,
        min: f64,
        max: f64,
    },

    #[error("x limits '{0}': expected MIN:MAX or 'auto'")]
    XLimitsSyntax(String),

    #[error("figure.{field} must be positive, got {value}")]
    InvalidFigure { field: &'static str, value: f64 },
}

/// Anything that stops a plotting run: bad input, bad configuration, or
/// failures around the window (fonts, screenshots).
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read font file '{}': {source}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write screenshot '{}': {source}", path.display())]
    Screenshot {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("screenshot buffer does not match its size {width}x{height}")]
    ScreenshotBuffer { width: usize, height: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_error_wraps_load_and_config() {
        let err: PlotError = LoadError::TokenCount {
            source_name: "a.xy".into(),
            line: 3,
            found: 1,
        }
        .into();
        assert!(matches!(err, PlotError::Load(LoadError::TokenCount { line: 3, .. })));
        assert_eq!(err.to_string(), "a.xy, line 3: expected 2 values, found 1");

        let err: PlotError = ConfigError::NoSpectra.into();
        assert!(matches!(err, PlotError::Config(ConfigError::NoSpectra)));
        assert_eq!(err.to_string(), "no spectra configured");
    }
}
