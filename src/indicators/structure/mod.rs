pub mod pivots;

pub use pivots::calculate_pivots;
