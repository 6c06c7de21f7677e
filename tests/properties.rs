use proptest::prelude::*;
use statbuf::StatsBuffer;

const TARGETS: [f64; 7] = [1.0, 10.0, 25.0, 50.0, 90.0, 99.9, 100.0];

fn samples(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-1_000_000i64..1_000_000, 1..=max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    // --- Window aggregates match the last `capacity` inputs ---
    #[test]
    fn window_aggregates(values in samples(200), capacity in 1usize..64) {
        let mut buf = StatsBuffer::new(capacity, &[]).unwrap();
        for &v in &values {
            buf.record(v);
        }
        buf.compute_stats();

        let start = values.len().saturating_sub(capacity);
        let window = &values[start..];
        prop_assert_eq!(buf.count(), window.len());
        prop_assert_eq!(buf.min(), *window.iter().min().unwrap());
        prop_assert_eq!(buf.max(), *window.iter().max().unwrap());
        prop_assert_eq!(buf.sum(), window.iter().sum::<i64>());
        let mean = window.iter().sum::<i64>() as f64 / window.len() as f64;
        prop_assert!((buf.mean() - mean).abs() < 1e-9);
    }

    // --- Percentiles are monotone and p100 is the max ---
    #[test]
    fn percentiles_monotone(values in samples(100)) {
        let mut buf = StatsBuffer::new(100, &TARGETS).unwrap();
        for &v in &values {
            buf.record(v);
        }
        buf.compute_stats();

        let pv = buf.percentile_values();
        prop_assert!(pv.windows(2).all(|w| w[0] <= w[1]), "not monotone: {:?}", pv);
        prop_assert_eq!(pv[TARGETS.len() - 1], buf.max() as f64);
        prop_assert!(pv[0] >= buf.min() as f64);
    }

    // --- Variance is non-negative and stddev is its root ---
    #[test]
    fn variance_non_negative(values in samples(100)) {
        let mut buf = StatsBuffer::new(100, &[]).unwrap();
        for &v in &values {
            buf.record(v);
        }
        buf.compute_stats();
        prop_assert!(buf.variance() >= 0.0);
        prop_assert!((buf.stddev() * buf.stddev() - buf.variance()).abs() <= 1e-6 * buf.variance().max(1.0));
    }

    // --- Computing twice changes nothing ---
    #[test]
    fn compute_is_idempotent(values in samples(50)) {
        let mut buf = StatsBuffer::new(32, &TARGETS).unwrap();
        for &v in &values {
            buf.record(v);
        }
        buf.compute_stats();
        let first = (buf.mean(), buf.variance(), buf.percentile_values());
        buf.compute_stats();
        prop_assert_eq!(first, (buf.mean(), buf.variance(), buf.percentile_values()));
    }
}
