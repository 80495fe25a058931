use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::LoadError;

use super::model::Spectrum;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an `.xy` spectrum: one point per line, two whitespace-separated
/// numbers (m/z, intensity), no header.
///
/// Blank lines are skipped. Any other line that is not exactly two finite
/// numbers fails the whole load; there is no partial-file recovery.
pub fn load_xy(path: &Path) -> Result<Spectrum, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let spectrum = parse_xy(BufReader::new(file), &path.display().to_string())?;

    log::info!("Loaded {} points from {}", spectrum.len(), path.display());
    Ok(spectrum)
}

/// Parse `.xy` text from any buffered reader. `source_name` only feeds error
/// messages.
pub fn parse_xy<R: BufRead>(reader: R, source_name: &str) -> Result<Spectrum, LoadError> {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: source_name.into(),
            source,
        })?;
        let line_no = idx + 1;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 2 {
            return Err(LoadError::TokenCount {
                source_name: source_name.to_string(),
                line: line_no,
                found: tokens.len(),
            });
        }

        x.push(parse_value(tokens[0], source_name, line_no)?);
        y.push(parse_value(tokens[1], source_name, line_no)?);
    }

    Ok(Spectrum::new(x, y))
}

/// Parse one finite number; `inf` / `nan` spellings are rejected like any
/// other non-numeric token.
fn parse_value(token: &str, source_name: &str, line: usize) -> Result<f64, LoadError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoadError::InvalidNumber {
            source_name: source_name.to_string(),
            line,
            token: token.to_string(),
        }),
    }
}
