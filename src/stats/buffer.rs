use crate::config::StatsConfig;
use crate::error::{Result, StatsError};
use crate::stats::percentile::{calc_percentile, is_valid_percentile};
use crate::util::ring_buffer::RingBuffer;
use log::{debug, trace};

/// Circular sampling buffer that records values and computes window stats.
///
/// Recording needs `&mut self`, so a single writer is guaranteed by the
/// borrow checker. To share a buffer across threads wrap it in a `Mutex`.
///
/// `compute_stats` is memoized until `reset`: recording after a computation
/// does not refresh the cached results.
#[derive(Debug, Clone)]
pub struct StatsBuffer {
    ring: RingBuffer,
    percentiles: Vec<f64>,
    percentile_values: Vec<f64>,
    computed: bool,
    computed_count: usize,
    mean: f64,
    variance: f64,
    stddev: f64,
    min: i64,
    max: i64,
    total: i64,
}

impl StatsBuffer {
    /// Create a buffer holding the last `capacity` values.
    ///
    /// `percentiles` lists the targets to compute, e.g. `&[95.0, 99.0]`.
    /// Pass an empty slice to compute none. Each must be in `(0.0, 100.0]`.
    pub fn new(capacity: usize, percentiles: &[f64]) -> Result<Self> {
        let ring = RingBuffer::new(capacity)
            .ok_or_else(|| StatsError::invalid("size of the buffer must be greater than 0"))?;
        if let Some(bad) = percentiles.iter().find(|p| !is_valid_percentile(**p)) {
            return Err(StatsError::invalid(format!(
                "all percentiles should be in the interval (0.0, 100.0], got {}",
                bad
            )));
        }

        let mut buf = Self {
            ring,
            percentiles:       percentiles.to_vec(),
            percentile_values: vec![0.0; percentiles.len()],
            computed:          false,
            computed_count:    0,
            mean:              0.0,
            variance:          0.0,
            stddev:            0.0,
            min:               0,
            max:               0,
            total:             0,
        };
        buf.reset();
        Ok(buf)
    }

    pub fn from_config(cfg: &StatsConfig) -> Result<Self> {
        cfg.validate()?;
        Self::new(cfg.sample_size, &cfg.percentiles)
    }

    /// Return every mutable field to its initial zero state.
    pub fn reset(&mut self) {
        trace!("resetting stats buffer (had {} samples)", self.ring.len());
        self.computed = false;
        self.ring.clear();
        self.computed_count = 0;
        self.total    = 0;
        self.mean     = 0.0;
        self.variance = 0.0;
        self.stddev   = 0.0;
        self.min      = 0;
        self.max      = 0;
        self.percentile_values.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn record(&mut self, value: i64) {
        self.ring.push(value);
    }

    /// Compute stats over the current window. Only the first call after
    /// construction or `reset` does any work.
    ///
    /// Sorts the occupied slots in place, so insertion order is lost.
    pub fn compute_stats(&mut self) {
        if self.computed {
            trace!("stats already computed for this window, skipping");
            return;
        }
        self.computed = true;

        if self.ring.is_empty() {
            return;
        }

        let values = self.ring.occupied_mut();
        values.sort_unstable();
        let n = values.len();
        self.computed_count = n;
        self.min = values[0];
        self.max = values[n - 1];

        let mut total: i64 = 0;
        let mut sum_squares = 0.0_f64;
        for &v in values.iter() {
            total = total.wrapping_add(v);
            sum_squares += v.wrapping_mul(v) as f64;
        }
        self.total = total;
        self.mean = total as f64 / n as f64;
        self.variance = if n == 1 {
            0.0
        } else {
            let t = total as f64;
            // cancellation can push this a hair below zero
            ((sum_squares - t * t / n as f64) / (n - 1) as f64).max(0.0)
        };
        self.stddev = self.variance.sqrt();

        let sorted = self.ring.occupied();
        for (slot, p) in self.percentile_values.iter_mut().zip(&self.percentiles) {
            *slot = calc_percentile(sorted, *p);
        }

        debug!(
            "computed stats over {} samples: min={} max={} mean={:.3} stddev={:.3}",
            n, self.min, self.max, self.mean, self.stddev
        );
    }

    /// Number of values in the window, up to the capacity.
    pub fn count(&self) -> usize { self.ring.len() }

    pub fn capacity(&self) -> usize { self.ring.capacity() }

    pub fn is_computed(&self) -> bool { self.computed }

    /// Window size the cached stats were computed over. Differs from
    /// [`count`](Self::count) when values were recorded after computing.
    pub fn computed_count(&self) -> usize { self.computed_count }

    /// Mean of the window, 0.0 if nothing was recorded.
    pub fn mean(&self) -> f64 { self.mean }

    /// Sample variance (divides by n - 1), 0.0 for fewer than two values.
    pub fn variance(&self) -> f64 { self.variance }

    /// Sample standard deviation.
    pub fn stddev(&self) -> f64 { self.stddev }

    pub fn min(&self) -> i64 { self.min }
    pub fn max(&self) -> i64 { self.max }

    /// Sum of the window.
    pub fn sum(&self) -> i64 { self.total }

    /// Same as [`sum`](Self::sum); timers publish it as total time.
    pub fn total(&self) -> i64 { self.total }

    /// The percentile targets, e.g. `[95.0, 99.0]`.
    pub fn percentiles(&self) -> Vec<f64> {
        self.percentiles.clone()
    }

    /// Computed values, aligned with [`percentiles`](Self::percentiles).
    pub fn percentile_values(&self) -> Vec<f64> {
        self.percentile_values.clone()
    }

    /// Value for the target at `index`: with targets `[95.0, 99.0]`,
    /// index 1 is the 99th percentile.
    pub fn percentile_value(&self, index: usize) -> Result<f64> {
        self.percentile_values
            .get(index)
            .copied()
            .ok_or(StatsError::IndexOutOfBounds { index, len: self.percentile_values.len() })
    }
}
