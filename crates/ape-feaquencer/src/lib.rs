//! Feature ordering resolver.
//!
//! Given a feature selection and a set of ordering constraints (`first`,
//! `last`, `after`), computes a single load order consistent with every
//! constraint, or reports why no such order exists.
//!
//! The resolver is a pure function of its inputs: it performs no I/O and
//! keeps no state between calls.

pub mod conditions;
pub mod error;
pub mod graph;
pub mod order;

pub use conditions::{
    ConditionKind, FeatureDependencies, FeatureDependency, OrderingCondition, OrderingConditions,
};
pub use error::OrderError;
pub use graph::{detect_cycle, to_dot, topsort, FeatureGraph};
pub use order::{dependency_graph, get_total_order};
