//! Fixed-capacity sampling buffer computing windowed statistics.
//!
//! A [`StatsBuffer`] keeps the most recent `capacity` observations. Owning
//! metrics `record` values, then periodically `compute_stats`, read the
//! accessors (or take a [`StatsSnapshot`]) and optionally `reset`.
//!
//! ```
//! use statbuf::StatsBuffer;
//!
//! let mut buf = StatsBuffer::new(5, &[50.0, 100.0]).unwrap();
//! for v in [10, 20, 30, 40, 50] {
//!     buf.record(v);
//! }
//! buf.compute_stats();
//! assert_eq!(buf.mean(), 30.0);
//! assert_eq!(buf.percentile_value(0), Ok(35.0));
//! ```

pub mod config;
pub mod error;
pub mod stats;
pub mod util;

pub use config::{Config, OutputConfig, OutputFormat, StatsConfig};
pub use error::{Result, StatsError};
pub use stats::{DataPoint, PercentileValue, StatsBuffer, StatsSnapshot};
