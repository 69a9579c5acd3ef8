//! Operation: render the enriched feature dependency graph.

use std::path::Path;

use ape_core::equation::{feature_selection, read_equation};
use ape_core::featuremodel::load_feature_dependencies;
use ape_feaquencer::{dependency_graph, to_dot, OrderingConditions};
use ape_util::errors::ApeResult;

/// DOT source of the dependency graph the resolver would sort, for the
/// features of `equation` (or just the declared features without one).
pub fn graph(constraints: &Path, equation: Option<&Path>) -> ApeResult<String> {
    let deps = load_feature_dependencies(constraints)?;
    let selection = match equation {
        Some(path) => feature_selection(&read_equation(path)?),
        None => Vec::new(),
    };
    let conditions = OrderingConditions::from_dependencies(&deps)?;
    let graph = dependency_graph(&selection, &conditions);
    Ok(to_dot(&graph))
}
