use miette::Diagnostic;
use thiserror::Error;

/// Reasons a feature order cannot be resolved.
///
/// Every variant is fatal to the resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum OrderError {
    /// More than one feature declares `first`.
    #[error("Found multiple first conditions: '{first}' and '{second}'")]
    #[diagnostic(help("Only one feature may be declared with \"first\": true"))]
    MultipleFirstConditions { first: String, second: String },

    /// More than one feature declares `last`.
    #[error("Found multiple last conditions: '{first}' and '{second}'")]
    #[diagnostic(help("Only one feature may be declared with \"last\": true"))]
    MultipleLastConditions { first: String, second: String },

    /// An `after` relation names the feature that must be loaded last.
    #[error("'{feature}' is declared after '{last}', but '{last}' must be the last feature")]
    #[diagnostic(help("Remove '{last}' from the \"after\" list of '{feature}'"))]
    AfterConditionToLast { feature: String, last: String },

    /// The constraint graph contains a cycle.
    #[error("Feature order contains a cycle: {}", path.join(" -> "))]
    GraphCycle { path: Vec<String> },
}
