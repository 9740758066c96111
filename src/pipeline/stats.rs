//! Small shared statistics helpers.

/// Quantile with linear interpolation between closest ranks.
///
/// Matches the default of `numpy.quantile` / `pandas.Series.quantile`, which
/// the fitted bounds and the batch risk cutoff both rely on. NaN values are
/// ignored. Returns `None` for an empty (or all-NaN) slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    debug_assert!((0.0..=1.0).contains(&q));

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }

    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }

    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}
