//! Write synthetic `.xy` spectra plus a matching `mz-stack.toml`.
//!
//!   cargo run --bin generate_sample -- [OUTPUT_DIR]
//!   cargo run -- --config OUTPUT_DIR/mz-stack.toml

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const PROTON_MASS: f64 = 1.007_276;

/// Neutral mass of the simulated protein and its sodium adduct shift.
const PROTEIN_MASS: f64 = 14_953.2;
const SODIUM_SHIFT: f64 = 21.98;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_spectrum(
    mz: &[f64],
    peaks: &[(f64, f64, f64)],
    noise_level: f64,
    noise: &mut Noise,
) -> Vec<f64> {
    mz.iter()
        .map(|&x| {
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(x, mu, sigma, amp))
                .sum();
            (signal + noise.normal(noise_level)).max(0.0)
        })
        .collect()
}

/// Seeded noise for reproducible sample files (splitmix64 stream).
struct Noise(u64);

impl Noise {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        ((z ^ (z >> 31)) >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Approximately normal: the sum of 12 uniforms has unit variance.
    fn normal(&mut self, std_dev: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.uniform()).sum();
        (sum - 6.0) * std_dev
    }
}

/// Evenly spaced axis from `start` to `end` inclusive.
fn axis(start: f64, end: f64, step: f64) -> Vec<f64> {
    let n = ((end - start) / step).round() as usize + 1;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// ESI charge-state envelope of one protein, m/z 1000–2000.
fn measured_peaks() -> Vec<(f64, f64, f64)> {
    (8..=15)
        .map(|z| {
            let z = z as f64;
            let mz = (PROTEIN_MASS + z * PROTON_MASS) / z;
            // Bell-shaped envelope centred around z = 11.
            let amp = 1.0e5 * (-(z - 11.0).powi(2) / 6.0).exp();
            (mz, 0.8, amp)
        })
        .collect()
}

/// Zero-charge spectrum: parent mass plus a sodium adduct.
fn deconvoluted_peaks() -> Vec<(f64, f64, f64)> {
    vec![
        (PROTEIN_MASS, 1.5, 4.0e5),
        (PROTEIN_MASS + SODIUM_SHIFT, 1.5, 0.6e5),
    ]
}

fn write_xy(path: &Path, x: &[f64], y: &[f64]) -> Result<()> {
    let mut body = String::with_capacity(x.len() * 24);
    for (xi, yi) in x.iter().zip(y) {
        writeln!(body, "{xi:.4} {yi:.2}")?;
    }
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

const CONFIG: &str = r#"[figure]
window_title = "mz-stack – sample data"
width_cm = 16.0
height_per_spectrum_cm = 4.0

[[spectra]]
path = "measured.xy"
title = "Mass spectrum - Measured"
x_limits = [1000.0, 2000.0]
peak_separation = 100.0
peak_count = 3

[[spectra]]
path = "deconvoluted.xy"
title = "Mass spectrum - Deconvoluted"
x_limits = [5000.0, 20000.0]
peak_separation = 3.0
peak_count = 1

[[spectra]]
path = "deconvoluted.xy"
title = "Mass spectrum - Deconvoluted"
x_limits = [14900.0, 15000.0]
peak_separation = 4.0
peak_count = 2
"#;

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut noise = Noise(42);

    let measured_mz = axis(900.0, 2100.0, 0.1);
    let measured = generate_spectrum(&measured_mz, &measured_peaks(), 250.0, &mut noise);
    write_xy(&out_dir.join("measured.xy"), &measured_mz, &measured)?;

    let mass = axis(5000.0, 20000.0, 0.5);
    let deconvoluted = generate_spectrum(&mass, &deconvoluted_peaks(), 500.0, &mut noise);
    write_xy(&out_dir.join("deconvoluted.xy"), &mass, &deconvoluted)?;

    let config_path = out_dir.join("mz-stack.toml");
    fs::write(&config_path, CONFIG).with_context(|| format!("writing {}", config_path.display()))?;

    println!(
        "Wrote measured.xy ({} points), deconvoluted.xy ({} points) and {} ",
        measured_mz.len(),
        mass.len(),
        config_path.display()
    );
    Ok(())
}
