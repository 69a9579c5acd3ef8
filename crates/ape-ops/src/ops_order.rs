//! Operation: resolve the load order of a feature selection.

use std::path::Path;

use ape_core::equation::{feature_selection, read_equation};
use ape_core::featuremodel::load_feature_dependencies;
use ape_feaquencer::{get_total_order, FeatureDependencies};
use ape_util::errors::ApeResult;

/// Order `lines` (raw equation or configuration lines) under `deps`.
///
/// Blank lines, comments and `_`-prefixed entries are not features.
pub fn order_features<S: AsRef<str>>(
    lines: &[S],
    deps: &FeatureDependencies,
) -> ApeResult<Vec<String>> {
    let selection = feature_selection(lines);
    tracing::debug!("ordering {} selected features", selection.len());
    Ok(get_total_order(&selection, deps)?)
}

/// Order the features of an equation file under a `feature_order.json`.
pub fn order_equation(equation: &Path, constraints: &Path) -> ApeResult<Vec<String>> {
    let lines = read_equation(equation)?;
    let deps = load_feature_dependencies(constraints)?;
    order_features(&lines, &deps)
}
