use crate::config::StatsConfig;
use crate::stats::StatsBuffer;
use serde::Serialize;

/// One computed percentile: target and value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileValue {
    pub percentile: f64,
    pub value:      f64,
}

/// Owned copy of a buffer's last computation, detached from the buffer so it
/// survives a subsequent `reset`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub count:       usize,
    pub capacity:    usize,
    pub sum:         i64,
    pub mean:        f64,
    pub variance:    f64,
    pub stddev:      f64,
    pub min:         i64,
    pub max:         i64,
    pub percentiles: Vec<PercentileValue>,
}

/// A named statistic as an owning timer would publish it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub name:  String,
    pub value: f64,
}

impl DataPoint {
    fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }
}

impl StatsSnapshot {
    /// Copy out whatever the buffer last computed (zeros if never computed).
    /// `count` is the size of the computed window, not the live ring.
    pub fn capture(buf: &StatsBuffer) -> Self {
        let percentiles = buf.percentiles().into_iter()
            .zip(buf.percentile_values())
            .map(|(percentile, value)| PercentileValue { percentile, value })
            .collect();
        Self {
            count:    buf.computed_count(),
            capacity: buf.capacity(),
            sum:      buf.sum(),
            mean:     buf.mean(),
            variance: buf.variance(),
            stddev:   buf.stddev(),
            min:      buf.min(),
            max:      buf.max(),
            percentiles,
        }
    }

    /// Statistics selected by the config's publish flags, followed by one
    /// `percentile_<tag>` per target.
    pub fn data_points(&self, cfg: &StatsConfig) -> Vec<DataPoint> {
        let mut out = Vec::new();
        if cfg.publish_count    { out.push(DataPoint::new("count",     self.count as f64)); }
        if cfg.publish_total    { out.push(DataPoint::new("totalTime", self.sum as f64)); }
        if cfg.publish_min      { out.push(DataPoint::new("min",       self.min as f64)); }
        if cfg.publish_max      { out.push(DataPoint::new("max",       self.max as f64)); }
        if cfg.publish_mean     { out.push(DataPoint::new("avg",       self.mean)); }
        if cfg.publish_variance { out.push(DataPoint::new("variance",  self.variance)); }
        if cfg.publish_stddev   { out.push(DataPoint::new("stdDev",    self.stddev)); }
        for p in &self.percentiles {
            out.push(DataPoint::new(percentile_tag(p.percentile), p.value));
        }
        out
    }
}

/// "percentile_95" for whole targets (zero-padded to two digits),
/// "percentile_99_5" otherwise.
pub fn percentile_tag(percentile: f64) -> String {
    if percentile.fract() == 0.0 {
        format!("percentile_{:02}", percentile as u32)
    } else {
        format!("percentile_{}", percentile.to_string().replace('.', "_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed_buffer() -> StatsBuffer {
        let mut buf = StatsBuffer::new(5, &[50.0, 99.5]).unwrap();
        for v in [10, 20, 30, 40, 50] {
            buf.record(v);
        }
        buf.compute_stats();
        buf
    }

    #[test]
    fn capture_copies_results() {
        let mut buf = computed_buffer();
        let snap = StatsSnapshot::capture(&buf);
        buf.reset();
        assert_eq!(snap.count, 5);
        assert_eq!(snap.sum, 150);
        assert_eq!(snap.percentiles[0], PercentileValue { percentile: 50.0, value: 35.0 });
        assert_eq!(snap.percentiles[1].value, 50.0);
    }

    #[test]
    fn count_matches_computed_window() {
        let mut buf = StatsBuffer::new(10, &[50.0]).unwrap();
        buf.record(1);
        buf.record(2);
        buf.compute_stats();
        buf.record(100);
        buf.record(200);
        buf.compute_stats();
        let snap = StatsSnapshot::capture(&buf);
        assert_eq!(buf.count(), 4);
        assert_eq!(snap.count, 2);
        assert_eq!(snap.sum, 3);
        assert_eq!(snap.mean, 1.5);
    }

    #[test]
    fn tags() {
        assert_eq!(percentile_tag(95.0), "percentile_95");
        assert_eq!(percentile_tag(5.0), "percentile_05");
        assert_eq!(percentile_tag(100.0), "percentile_100");
        assert_eq!(percentile_tag(99.5), "percentile_99_5");
    }

    #[test]
    fn data_points_follow_publish_flags() {
        let snap = StatsSnapshot::capture(&computed_buffer());
        let names: Vec<String> = snap.data_points(&StatsConfig::default())
            .into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            ["count", "totalTime", "min", "max", "avg", "percentile_50", "percentile_99_5"]
        );

        let cfg = StatsConfig {
            publish_count: false,
            publish_total: false,
            publish_variance: true,
            publish_stddev: true,
            ..StatsConfig::default()
        };
        let points = snap.data_points(&cfg);
        assert_eq!(points[0], DataPoint::new("min", 10.0));
        assert!(points.iter().any(|d| d.name == "variance" && d.value == 250.0));
        assert!(points.iter().any(|d| d.name == "stdDev"));
    }

    #[test]
    fn serializes_to_json() {
        let snap = StatsSnapshot::capture(&computed_buffer());
        let v = serde_json::to_value(&snap).unwrap();
        assert_eq!(v["count"], 5);
        assert_eq!(v["mean"], 30.0);
        assert_eq!(v["percentiles"][0]["value"], 35.0);
    }
}
