//! Shared test fixtures for SurroForge crates.
//!
//! This crate provides concrete feature and preprocessing types plus
//! ready-made model sets for testing:
//!
//! - [`feature`] - Concrete `Feature` implementation and constructors
//! - [`preprocessing`] - Concrete preprocessing spec type
//! - [`scenario`] - Model builders and canonical ensemble scenarios
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! surroforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use surroforge_test::scenario::{two_model_scenario, Scenario};
//! use surroforge_test::feature::{continuous, categorical};
//! ```

pub mod feature;
pub mod preprocessing;
pub mod scenario;

// Re-export commonly used types at crate root for convenience
pub use feature::TestFeature;
pub use preprocessing::TestTransform;
pub use scenario::{Scenario, TestModel};
