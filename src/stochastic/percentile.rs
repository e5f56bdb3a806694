//! Percentile reduction with linear interpolation between order statistics

/// Percentile `q` (in [0, 1]) of an ascending-sorted slice.
///
/// Returns 0.0 for an empty slice.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Sort in place, then take percentile `q`
pub fn percentile(values: &mut [f64], q: f64) -> f64 {
    values.sort_unstable_by(|a, b| a.total_cmp(b));
    percentile_sorted(values, q)
}

/// Median of an unsorted sample, 0.0 when empty
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    percentile(&mut sorted, 0.5)
}
