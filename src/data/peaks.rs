use super::model::PeakLabel;

// ---------------------------------------------------------------------------
// Local-maximum peak picking
// ---------------------------------------------------------------------------

/// Pick up to `max_count` of the tallest strict local maxima, keeping every
/// pick more than `min_separation` (in m/z) away from the others.
///
/// * Only interior points qualify: `y[i] > y[i - 1] && y[i] > y[i + 1]`.
///   Plateaus and endpoints never do, and neither does NaN.
/// * Candidates are visited tallest first. Equal heights keep their
///   discovery order (stable sort), so the lower-index peak wins a tie.
/// * A candidate with `|dx| <= min_separation` to an accepted peak is
///   dropped. This is greedy suppression, not an optimal subset.
///
/// Mismatched `x` / `y` lengths are truncated to the shorter one.
pub fn find_peaks(x: &[f64], y: &[f64], min_separation: f64, max_count: usize) -> Vec<PeakLabel> {
    let n = x.len().min(y.len());
    if n < 3 || max_count == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<PeakLabel> = (1..n - 1)
        .filter(|&i| y[i] > y[i - 1] && y[i] > y[i + 1])
        .map(|i| PeakLabel::new(x[i], y[i]))
        .collect();

    // `sort_by` is stable: equal intensities stay in index order.
    candidates.sort_by(|a, b| b.y.total_cmp(&a.y));

    let mut accepted: Vec<PeakLabel> = Vec::with_capacity(max_count.min(candidates.len()));
    for candidate in candidates {
        let crowded = accepted
            .iter()
            .any(|kept| (candidate.x - kept.x).abs() <= min_separation);
        if crowded {
            log::trace!(
                "rejected peak at m/z {:.4}: within {} of an accepted peak",
                candidate.x,
                min_separation
            );
            continue;
        }

        accepted.push(candidate);
        if accepted.len() >= max_count {
            break;
        }
    }

    log::debug!(
        "picked {} peak(s) (separation {}, max {})",
        accepted.len(),
        min_separation,
        max_count
    );
    accepted
}
