//! Checks a given feature order against `before`/`after`/`position` constraints.

use std::collections::BTreeMap;
use std::fmt;

use ape_util::errors::ApeError;
use serde::Deserialize;

/// Ordering constraints of one feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderConstraint {
    /// Features that must precede this one.
    #[serde(default)]
    pub after: Vec<String>,
    /// Features that must follow this one.
    #[serde(default)]
    pub before: Vec<String>,
    /// Exact zero-based index this feature must occupy.
    #[serde(default)]
    pub position: Option<usize>,
}

/// Constraints keyed by feature name.
pub type OrderConstraints = BTreeMap<String, OrderConstraint>;

/// How features absent from the validated list are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Absent features are skipped. A product equation rarely contains
    /// every feature of the product line.
    #[default]
    Tolerant,
    /// Every constrained or referenced feature must be present, as in a
    /// feature model's complete feature order.
    Strict,
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub feature: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Clone, Copy)]
enum Relation {
    Before,
    After,
}

impl Relation {
    fn label(self) -> &'static str {
        match self {
            Relation::Before => "BEFORE",
            Relation::After => "AFTER",
        }
    }

    fn violated(self, feature_pos: usize, other_pos: usize) -> bool {
        match self {
            Relation::Before => feature_pos > other_pos,
            Relation::After => feature_pos < other_pos,
        }
    }
}

/// Collects every constraint violation of a feature list; nothing short-circuits.
pub struct FeatureOrderValidator<'a> {
    feature_list: Vec<String>,
    constraints: &'a OrderConstraints,
    mode: ValidationMode,
    violations: Vec<Violation>,
}

impl<'a> FeatureOrderValidator<'a> {
    /// FeatureIDE spells sub-feature paths with `__`; they are compared in
    /// dotted form.
    pub fn new<S: AsRef<str>>(feature_list: &[S], constraints: &'a OrderConstraints) -> Self {
        Self {
            feature_list: feature_list
                .iter()
                .map(|f| f.as_ref().replace("__", "."))
                .collect(),
            constraints,
            mode: ValidationMode::default(),
            violations: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check every constraint, collecting violations.
    ///
    /// Returns whether the order is valid. In strict mode a feature missing
    /// from the list is an error.
    pub fn check_order(&mut self) -> Result<bool, ApeError> {
        self.violations.clear();
        for (feature, constraint) in self.constraints {
            if self.mode == ValidationMode::Strict {
                self.require_present(feature, constraint)?;
            }
            self.check_relation(feature, &constraint.before, Relation::Before);
            self.check_relation(feature, &constraint.after, Relation::After);
            self.check_position(feature, constraint);
        }
        Ok(!self.has_errors())
    }

    /// Zero-based index of the first occurrence of `feature`.
    pub fn feature_position(&self, feature: &str) -> Option<usize> {
        self.feature_list.iter().position(|f| f == feature)
    }

    pub fn has_errors(&self) -> bool {
        !self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn require_present(&self, feature: &str, constraint: &OrderConstraint) -> Result<(), ApeError> {
        let referenced = constraint.before.iter().chain(&constraint.after);
        for name in std::iter::once(feature).chain(referenced.map(String::as_str)) {
            if self.feature_position(name).is_none() {
                return Err(ApeError::FeatureNotFound {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_relation(&mut self, feature: &str, others: &[String], relation: Relation) {
        let Some(feature_pos) = self.feature_position(feature) else {
            return;
        };
        for other in others {
            let Some(other_pos) = self.feature_position(other) else {
                continue;
            };
            if relation.violated(feature_pos, other_pos) {
                self.violations.push(Violation {
                    feature: feature.to_string(),
                    message: format!(
                        "{feature} (pos {feature_pos}) must be {} feature {other} (pos {other_pos}) but isn't.",
                        relation.label()
                    ),
                });
            }
        }
    }

    fn check_position(&mut self, feature: &str, constraint: &OrderConstraint) {
        let Some(pos) = constraint.position else {
            return;
        };
        if let Some(feature_pos) = self.feature_position(feature) {
            if feature_pos != pos {
                self.violations.push(Violation {
                    feature: feature.to_string(),
                    message: format!(
                        "{feature} has a forced position on ({pos}) but is on position {feature_pos}."
                    ),
                });
            }
        }
    }
}
