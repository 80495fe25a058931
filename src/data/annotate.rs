use super::model::{Annotation, AxisBounds, PeakLabel, Spectrum};

/// Labels sit this fraction of the spectrum's maximum intensity above their peak.
pub const LABEL_OFFSET_FRACTION: f64 = 0.1;

/// Margin above the tallest point; room for the label text itself comes
/// from [`with_label_room`] once the on-screen plot height is known.
const Y_HEADROOM_FRACTION: f64 = 0.15;

/// Lay out one text label + arrow per peak.
pub fn annotate(spectrum: &Spectrum, peaks: &[PeakLabel]) -> Vec<Annotation> {
    let offset = spectrum.max_intensity().unwrap_or(0.0) * LABEL_OFFSET_FRACTION;
    peaks
        .iter()
        .map(|peak| Annotation {
            peak: *peak,
            text_position: [peak.x, peak.y + offset],
            text: peak.to_string(),
        })
        .collect()
}

/// Compute the rectangle a subplot shows.
///
/// `x_limits` pins the m/z range even when no data falls inside it. The
/// intensity range always covers the whole series; limits never rescale it.
pub fn axis_bounds(spectrum: &Spectrum, x_limits: Option<[f64; 2]>) -> AxisBounds {
    let x = match x_limits {
        Some(limits) => limits,
        None => match spectrum.mz_range() {
            Some((lo, hi)) => widen(lo, hi),
            None => [0.0, 1.0],
        },
    };

    let y = match (spectrum.min_intensity(), spectrum.max_intensity()) {
        (Some(lo), Some(hi)) => {
            let lo = lo.min(0.0);
            let hi = if hi > 0.0 {
                hi * (1.0 + Y_HEADROOM_FRACTION)
            } else {
                hi
            };
            widen(lo, hi)
        }
        _ => [0.0, 1.0],
    };

    AxisBounds { x, y }
}

/// Raise the top of `bounds` so every label, `label_height` points tall and
/// anchored at its bottom edge, stays inside a data area `area_height`
/// points tall.
///
/// Working in points keeps the room constant on screen regardless of the
/// intensity scale.
pub fn with_label_room(
    bounds: AxisBounds,
    annotations: &[Annotation],
    label_height: f64,
    area_height: f64,
) -> AxisBounds {
    if annotations.is_empty() || !(area_height > 0.0) {
        return bounds;
    }

    // Fraction of the plot one label line takes; capped so the data keeps
    // some of the height.
    let fraction = (label_height / area_height).clamp(0.0, 0.9);
    let bottom = bounds.y[0];

    // top - fraction * (top - bottom) >= label_y
    let needed = annotations
        .iter()
        .map(|a| a.text_position[1])
        .filter(|y| y.is_finite())
        .map(|y| (y - fraction * bottom) / (1.0 - fraction))
        .fold(bounds.y[1], f64::max);

    AxisBounds {
        x: bounds.x,
        y: [bottom, needed],
    }
}

/// Give degenerate ranges a unit span centred on the value.
fn widen(lo: f64, hi: f64) -> [f64; 2] {
    if hi - lo > f64::EPSILON * lo.abs().max(1.0) {
        [lo, hi]
    } else {
        [lo - 0.5, hi + 0.5]
    }
}
