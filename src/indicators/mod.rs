//! Pure indicator transforms over a candle series.
//!
//! Every function takes an immutable series and returns `Option`: an
//! indicator that cannot be computed from the available history reports as
//! unavailable instead of producing a spurious value.

pub mod momentum;
pub mod snapshot;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use snapshot::compute_snapshot;
