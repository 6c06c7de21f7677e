/// Format an integer with thousands separators: "1,247,000"
pub fn fmt_count(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a float with three decimals, or "—" when it is not finite.
pub fn fmt_float(v: f64) -> String {
    if v.is_finite() { format!("{:.3}", v) } else { "—".to_string() }
}

/// Format a percentile target for display: "p95", "p99.5"
pub fn fmt_percentile(p: f64) -> String {
    format!("p{}", p)
}

/// Format a fill ratio: "84.5%"
pub fn fmt_pct(part: usize, whole: usize) -> String {
    if whole == 0 { return "0.0%".to_string(); }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}
