use std::fmt;

// ---------------------------------------------------------------------------
// Spectrum – one loaded .xy file
// ---------------------------------------------------------------------------

/// A single mass spectrum: m/z on `x`, intensity on `y`.
///
/// `x` is expected to be increasing, but nothing enforces it; the loader
/// keeps points in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// m/z axis.
    pub x: Vec<f64>,
    /// Intensity axis – same length as `x`.
    pub y: Vec<f64>,
}

impl Spectrum {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self { x, y }
    }

    /// Build from `(x, y)` pairs.
    #[cfg(test)]
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let (x, y) = points.iter().copied().unzip();
        Self { x, y }
    }

    /// Number of data points.
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `[x, y]` pairs, the shape egui_plot wants.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| [x, y])
    }

    /// Largest finite intensity. `None` for an empty spectrum.
    pub fn max_intensity(&self) -> Option<f64> {
        self.y
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    /// Smallest finite intensity.
    pub fn min_intensity(&self) -> Option<f64> {
        self.y
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::min)
    }

    /// `(min, max)` of the finite m/z values.
    pub fn mz_range(&self) -> Option<(f64, f64)> {
        let mut finite = self.x.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

// ---------------------------------------------------------------------------
// PeakLabel – a local maximum picked for annotation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakLabel {
    pub x: f64,
    pub y: f64,
}

impl PeakLabel {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PeakLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.x)
    }
}

// ---------------------------------------------------------------------------
// Annotation / AxisBounds – what a subplot actually draws
// ---------------------------------------------------------------------------

/// Text label plus arrow for one peak, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub peak: PeakLabel,
    /// Where the label text sits; the arrow runs from here to `peak`.
    pub text_position: [f64; 2],
    pub text: String,
}

/// The data-space rectangle shown by one subplot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl AxisBounds {
    pub fn min(&self) -> [f64; 2] {
        [self.x[0], self.y[0]]
    }

    pub fn max(&self) -> [f64; 2] {
        [self.x[1], self.y[1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_splits_axes() {
        let sp = Spectrum::from_points(&[(1.0, 10.0), (2.0, 20.0)]);
        assert_eq!(sp.x, vec![1.0, 2.0]);
        assert_eq!(sp.y, vec![10.0, 20.0]);
        assert_eq!(sp.len(), 2);
    }

    #[test]
    fn test_intensity_extrema_skip_non_finite() {
        let sp = Spectrum::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![f64::NAN, 4.0, -1.0, f64::INFINITY, f64::NEG_INFINITY],
        );
        assert_eq!(sp.max_intensity(), Some(4.0));
        assert_eq!(sp.min_intensity(), Some(-1.0));
        assert_eq!(Spectrum::default().max_intensity(), None);
    }

    #[test]
    fn test_mz_range_unsorted() {
        let sp = Spectrum::new(vec![5.0, 1.0, 3.0], vec![0.0; 3]);
        assert_eq!(sp.mz_range(), Some((1.0, 5.0)));

        let with_inf = Spectrum::new(vec![f64::NEG_INFINITY, 2.0, 7.0], vec![0.0; 3]);
        assert_eq!(with_inf.mz_range(), Some((2.0, 7.0)));
    }

    #[test]
    fn test_peak_label_display() {
        assert_eq!(PeakLabel::new(14953.456, 1.0).to_string(), "14953.46");
    }
}
