pub mod buffer;
pub mod percentile;
pub mod snapshot;

pub use buffer::StatsBuffer;
pub use snapshot::{DataPoint, PercentileValue, StatsSnapshot};
