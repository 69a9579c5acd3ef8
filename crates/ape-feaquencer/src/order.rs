//! Total order resolution over a feature selection.

use std::collections::HashSet;

use crate::conditions::{FeatureDependencies, OrderingConditions};
use crate::error::OrderError;
use crate::graph::{detect_cycle, topsort, FeatureGraph};

/// Build the enriched dependency graph for `selection`.
///
/// The graph covers every declared feature plus the selection, since a
/// selected feature may be constrained through an unselected one. Every
/// feature except `first` requires `first`, and `last` requires every
/// other feature.
pub fn dependency_graph<S: AsRef<str>>(
    selection: &[S],
    conditions: &OrderingConditions,
) -> FeatureGraph {
    let mut graph = conditions.before().clone();
    for feature in selection {
        graph.add_node(feature.as_ref());
    }

    let features: Vec<String> = graph.keys().map(str::to_string).collect();
    for feature in &features {
        if let Some(first) = conditions.first() {
            if feature != first && !graph.has_edge(feature, first) {
                graph.add_edge(feature, first);
            }
        }
        if let Some(last) = conditions.last() {
            if feature != last && !graph.has_edge(last, feature) {
                graph.add_edge(last, feature);
            }
        }
    }
    graph
}

/// Compute the load order of `selection` under `dependencies`.
///
/// Returns only the selected features, ordered so that every declared and
/// implicit constraint holds. Identical inputs always give identical output.
pub fn get_total_order<S: AsRef<str>>(
    selection: &[S],
    dependencies: &FeatureDependencies,
) -> Result<Vec<String>, OrderError> {
    let conditions = OrderingConditions::from_dependencies(dependencies)?;
    let graph = dependency_graph(selection, &conditions);
    tracing::debug!(
        "feature graph: {} nodes, {} edges",
        graph.len(),
        graph.edge_count()
    );

    if let Some(path) = detect_cycle(&graph) {
        return Err(OrderError::GraphCycle { path });
    }

    let selected: HashSet<&str> = selection.iter().map(AsRef::as_ref).collect();
    let mut order = topsort(&graph);
    order.reverse();
    order.retain(|feature| selected.contains(feature.as_str()));
    Ok(order)
}
