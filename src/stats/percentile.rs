/// Percentile of an ascending-sorted slice by linear interpolation between
/// the closest ranks, using `rank = p * n / 100` on 0-based indices.
///
/// Ranks past the last index clamp to the max, so `p = 100` always yields
/// the largest value. An exact integral rank returns that element without
/// interpolating.
pub fn calc_percentile(sorted: &[i64], percent: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0] as f64;
    }

    let rank = percent * n as f64 / 100.0;
    let lower = rank.floor() as usize;
    let upper = lower + 1;
    let frac = rank - lower as f64;

    if upper >= n {
        sorted[n - 1] as f64
    } else if frac == 0.0 {
        sorted[lower] as f64
    } else {
        let lo = sorted[lower] as f64;
        let hi = sorted[upper] as f64;
        frac * (hi - lo) + lo
    }
}

/// A target is valid when it lies in `(0.0, 100.0]`. NaN is never valid.
pub fn is_valid_percentile(p: f64) -> bool {
    p > 0.0 && p <= 100.0
}
