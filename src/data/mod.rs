/// Data layer: core types, loading, peak picking and label layout.
///
/// Architecture:
/// ```text
///   spectrum.xy
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse "x y" lines → Spectrum
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  peaks    │  strict local maxima, greedy separation → PeakLabel[]
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ annotate  │  label text/positions, axis bounds
///   └──────────┘
/// ```

pub mod annotate;
pub mod loader;
pub mod model;
pub mod peaks;
