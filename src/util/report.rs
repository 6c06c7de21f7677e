use crate::stats::StatsSnapshot;
use crate::util::human::{fmt_count, fmt_float, fmt_pct, fmt_percentile};

/// Render a human-readable block for one computed window.
pub fn generate(snap: &StatsSnapshot, label: &str) -> String {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    render(snap, label, &now.to_string())
}

fn render(snap: &StatsSnapshot, label: &str, timestamp: &str) -> String {
    let mut out = String::new();

    out.push_str("═══════════════════════════════════════════════\n");
    out.push_str(&format!("  {} — {}\n", label, timestamp));
    out.push_str("═══════════════════════════════════════════════\n");
    out.push_str(&format!(
        "  {:<10} {} / {} ({} full)\n",
        "count", fmt_count(snap.count as i64), fmt_count(snap.capacity as i64),
        fmt_pct(snap.count, snap.capacity),
    ));
    if snap.count == 0 {
        out.push_str("  (no samples)\n\n");
        return out;
    }

    out.push_str(&format!("  {:<10} {}\n", "sum",      fmt_count(snap.sum)));
    out.push_str(&format!("  {:<10} {}\n", "min",      fmt_count(snap.min)));
    out.push_str(&format!("  {:<10} {}\n", "max",      fmt_count(snap.max)));
    out.push_str(&format!("  {:<10} {}\n", "mean",     fmt_float(snap.mean)));
    out.push_str(&format!("  {:<10} {}\n", "variance", fmt_float(snap.variance)));
    out.push_str(&format!("  {:<10} {}\n", "stddev",   fmt_float(snap.stddev)));

    if !snap.percentiles.is_empty() {
        out.push_str(&format!("  {}\n", "─".repeat(30)));
        for p in &snap.percentiles {
            out.push_str(&format!("  {:<10} {}\n", fmt_percentile(p.percentile), fmt_float(p.value)));
        }
    }
    out.push('\n');
    out
}
