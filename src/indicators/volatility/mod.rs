pub mod atr;
pub mod bollinger;

pub use atr::{calculate_atr, calculate_atr_default};
pub use bollinger::{calculate_bollinger_bands, calculate_bollinger_bands_default};
