use std::path::PathBuf;

use clap::Parser;

use crate::config::{FigureConfig, PlotConfig, XLimits};
use crate::error::ConfigError;

/// Stacked mass spectrum plots with automatic peak labels.
///
/// Spectra come either from a config file (`--config`) or from the
/// repeatable per-spectrum flags, which are matched up by position:
///
///   mz-stack -f ms.xy -t "Measured" -x 1000:2000 -s 100 -n 3 \
///            -f deconv.xy -t "Deconvoluted" -x auto -s 3 -n 1
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (can be repeated: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease logging verbosity (can be repeated: -q for warn, -qq for error)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long,
        short = 'c',
        value_name = "FILE",
        help = "Plot configuration file (.toml or .json)",
        conflicts_with_all = ["files", "titles", "x_limits", "separations", "peak_counts"]
    )]
    pub config: Option<PathBuf>,

    #[arg(long = "file", short = 'f', value_name = "XY", help = "Spectrum file, one per plot")]
    pub files: Vec<PathBuf>,

    #[arg(long = "title", short = 't', value_name = "TEXT", help = "Plot title, one per file")]
    pub titles: Vec<String>,

    #[arg(
        long = "xlim",
        short = 'x',
        value_name = "MIN:MAX|auto",
        help = "m/z axis limits, one per file"
    )]
    pub x_limits: Vec<XLimits>,

    #[arg(
        long = "separation",
        short = 's',
        value_name = "MZ",
        help = "Minimum m/z distance between labelled peaks, one per file"
    )]
    pub separations: Vec<f64>,

    #[arg(
        long = "peaks",
        short = 'n',
        value_name = "N",
        help = "Number of peaks to label, one per file"
    )]
    pub peak_counts: Vec<usize>,

    #[arg(long, value_name = "PNG", help = "Save a screenshot after the first frame, then exit")]
    pub save: Option<PathBuf>,
}

impl Cli {
    /// `log` filter implied by `-v` / `-q`; `RUST_LOG` still wins.
    pub fn log_level(&self) -> log::LevelFilter {
        match i16::from(self.verbose) - i16::from(self.quiet) {
            i16::MIN..=-2 => log::LevelFilter::Error,
            -1 => log::LevelFilter::Warn,
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Build the validated plot configuration from whichever source was given.
    pub fn plot_config(&self) -> Result<PlotConfig, ConfigError> {
        if let Some(path) = &self.config {
            return PlotConfig::from_file(path);
        }

        PlotConfig::from_parallel_lists(
            self.files.clone(),
            self.x_limits.iter().map(|l| l.0).collect(),
            self.titles.clone(),
            self.separations.clone(),
            self.peak_counts.clone(),
            FigureConfig::default(),
        )
    }
}
