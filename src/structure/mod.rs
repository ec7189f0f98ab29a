//! Market-structure classification.

pub mod classifier;

pub use classifier::{classify, StructureConfig};
