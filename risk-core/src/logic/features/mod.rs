//! Features Module - Feature Derivation
//!
//! Turns employee attributes into the fixed-order vector the model reads.

pub mod attributes;
pub mod layout;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use attributes::{EmployeeAttributes, Performance};
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo};
pub use vector::{derive_features, FeatureVector};
