//! Validators for product equations.

pub mod feature_order;
pub mod product_spec;

pub use feature_order::{FeatureOrderValidator, OrderConstraint, OrderConstraints, ValidationMode, Violation};
pub use product_spec::{ProductSpec, ProductSpecValidator};
