//! Ordering constraints: raw per-feature declarations and their aggregation.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OrderError;
use crate::graph::FeatureGraph;

/// The kind of a single ordering condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// The feature is loaded before every other feature.
    First,
    /// The feature is loaded after every other feature.
    Last,
    /// The feature is loaded after its subject.
    After,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::First => write!(f, "first"),
            ConditionKind::Last => write!(f, "last"),
            ConditionKind::After => write!(f, "after"),
        }
    }
}

/// One declared relation about the feature `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingCondition {
    pub name: String,
    pub kind: ConditionKind,
    /// The other feature of an `after` relation.
    pub subject: Option<String>,
}

impl OrderingCondition {
    pub fn first(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ConditionKind::First,
            subject: None,
        }
    }

    pub fn last(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ConditionKind::Last,
            subject: None,
        }
    }

    /// `name` must be loaded after `subject`.
    pub fn after(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ConditionKind::After,
            subject: Some(subject.into()),
        }
    }
}

impl fmt::Display for OrderingCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "{} {} {}", self.name, self.kind, subject),
            None => write!(f, "{} {}", self.name, self.kind),
        }
    }
}

/// A feature's declaration in `feature_order.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDependency {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub after: Vec<String>,
}

/// `null` reads as the field's default, same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FeatureDependency {
    /// Expand the declaration of `name` into conditions: `after` relations
    /// first, then `first`, then `last`.
    pub fn conditions(&self, name: &str) -> Vec<OrderingCondition> {
        let mut conditions: Vec<OrderingCondition> = self
            .after
            .iter()
            .map(|subject| OrderingCondition::after(name, subject.as_str()))
            .collect();
        if self.first {
            conditions.push(OrderingCondition::first(name));
        }
        if self.last {
            conditions.push(OrderingCondition::last(name));
        }
        conditions
    }
}

/// The raw constraint document: feature name to declaration, in document order.
///
/// Deserializes from a JSON object; a key repeated in the document keeps
/// its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureDependencies {
    entries: Vec<(String, FeatureDependency)>,
}

impl FeatureDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `feature_order.json` document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Insert or replace the declaration of `name`.
    pub fn insert(&mut self, name: impl Into<String>, dependency: FeatureDependency) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = dependency,
            None => self.entries.push((name, dependency)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureDependency> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, dep)| dep)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FeatureDependency> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, dep)| dep)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureDependency)> {
        self.entries.iter().map(|(n, dep)| (n.as_str(), dep))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All conditions declared by the document, in document order.
    pub fn conditions(&self) -> Vec<OrderingCondition> {
        self.entries
            .iter()
            .flat_map(|(name, dep)| dep.conditions(name))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, FeatureDependency)> for FeatureDependencies {
    fn from_iter<I: IntoIterator<Item = (S, FeatureDependency)>>(iter: I) -> Self {
        let mut deps = FeatureDependencies::new();
        for (name, dep) in iter {
            deps.insert(name, dep);
        }
        deps
    }
}

impl<'de> Deserialize<'de> for FeatureDependencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DependenciesVisitor;

        impl<'de> Visitor<'de> for DependenciesVisitor {
            type Value = FeatureDependencies;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of feature names to ordering declarations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut deps = FeatureDependencies::new();
                while let Some((name, dep)) = map.next_entry::<String, FeatureDependency>()? {
                    deps.insert(name, dep);
                }
                Ok(deps)
            }
        }

        deserializer.deserialize_map(DependenciesVisitor)
    }
}

/// Conditions aggregated into a graph-ready form.
///
/// `before` maps a feature to the features that must be loaded before it.
/// Structurally invalid condition sets are rejected while aggregating.
#[derive(Debug, Clone, Default)]
pub struct OrderingConditions {
    first: Option<String>,
    last: Option<String>,
    before: FeatureGraph,
}

impl OrderingConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate every condition of `deps` and check the result for
    /// `after` relations pointing at the last feature.
    pub fn from_dependencies(deps: &FeatureDependencies) -> Result<Self, OrderError> {
        let mut conditions = Self::new();
        for condition in deps.conditions() {
            conditions.add(condition)?;
        }
        conditions.check_after_to_last()?;
        tracing::debug!(
            "aggregated {} ordering declarations (first: {:?}, last: {:?})",
            deps.len(),
            conditions.first,
            conditions.last
        );
        Ok(conditions)
    }

    /// Add a single condition.
    ///
    /// An `after` relation is only checked against a `last` feature that is
    /// already known; call [`check_after_to_last`](Self::check_after_to_last)
    /// once all conditions are in.
    pub fn add(&mut self, condition: OrderingCondition) -> Result<(), OrderError> {
        match condition.kind {
            ConditionKind::First => {
                if let Some(first) = &self.first {
                    return Err(OrderError::MultipleFirstConditions {
                        first: first.clone(),
                        second: condition.name,
                    });
                }
                self.before.add_node(&condition.name);
                self.first = Some(condition.name);
            }
            ConditionKind::Last => {
                if let Some(last) = &self.last {
                    return Err(OrderError::MultipleLastConditions {
                        first: last.clone(),
                        second: condition.name,
                    });
                }
                self.before.add_node(&condition.name);
                self.last = Some(condition.name);
            }
            ConditionKind::After => {
                let Some(subject) = condition.subject else {
                    return Ok(());
                };
                if self.last.as_deref() == Some(subject.as_str()) {
                    return Err(OrderError::AfterConditionToLast {
                        feature: condition.name,
                        last: subject,
                    });
                }
                self.before.add_edge(&condition.name, &subject);
            }
        }
        Ok(())
    }

    /// Reject any `after` relation whose subject is the last feature,
    /// regardless of declaration order.
    pub fn check_after_to_last(&self) -> Result<(), OrderError> {
        let Some(last) = self.last.as_deref() else {
            return Ok(());
        };
        for (feature, prerequisites) in self.before.iter() {
            if prerequisites.contains(&last) {
                return Err(OrderError::AfterConditionToLast {
                    feature: feature.to_string(),
                    last: last.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Feature -> features that must be loaded before it.
    pub fn before(&self) -> &FeatureGraph {
        &self.before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(features: &[&str]) -> FeatureDependency {
        FeatureDependency {
            after: features.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn first() -> FeatureDependency {
        FeatureDependency {
            first: true,
            ..Default::default()
        }
    }

    fn last() -> FeatureDependency {
        FeatureDependency {
            last: true,
            ..Default::default()
        }
    }

    #[test]
    fn parse_feature_order_json_keeps_document_order() {
        let json = r#"{
            "statics": {"after": ["lessbuilder"]},
            "django_productline": {"first": true},
            "lessbuilder": {"after": ["styler", "django_productline"]},
            "development": {"last": true, "comment": "ignored"}
        }"#;
        let deps = FeatureDependencies::from_json(json).unwrap();
        let names: Vec<&str> = deps.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["statics", "django_productline", "lessbuilder", "development"]
        );
        assert!(deps.get("django_productline").unwrap().first);
        assert!(deps.get("development").unwrap().last);
        assert_eq!(
            deps.get("lessbuilder").unwrap().after,
            vec!["styler", "django_productline"]
        );
    }

    #[test]
    fn parse_null_flags_as_unset() {
        let deps = FeatureDependencies::from_json(
            r#"{"a": {"first": null}, "b": {"last": null, "after": null}}"#,
        )
        .unwrap();
        assert_eq!(deps.get("a"), Some(&FeatureDependency::default()));
        assert_eq!(deps.get("b"), Some(&FeatureDependency::default()));
        let oc = OrderingConditions::from_dependencies(&deps).unwrap();
        assert_eq!(oc.first(), None);
        assert_eq!(oc.last(), None);
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(FeatureDependencies::from_json("[1, 2]").is_err());
    }

    #[test]
    fn conditions_expand_after_then_first_then_last() {
        let dep = FeatureDependency {
            first: true,
            last: true,
            after: vec!["a".into(), "b".into()],
        };
        let conditions = dep.conditions("x");
        assert_eq!(
            conditions,
            vec![
                OrderingCondition::after("x", "a"),
                OrderingCondition::after("x", "b"),
                OrderingCondition::first("x"),
                OrderingCondition::last("x"),
            ]
        );
    }

    #[test]
    fn condition_display() {
        assert_eq!(
            OrderingCondition::after("lessbuilder", "styler").to_string(),
            "lessbuilder after styler"
        );
        assert_eq!(OrderingCondition::first("dpl").to_string(), "dpl first");
    }

    #[test]
    fn aggregate_records_after_as_prerequisite() {
        let deps: FeatureDependencies = [
            ("dpl", first()),
            ("statics", last()),
            ("lessbuilder", after(&["dpl", "styler"])),
        ]
        .into_iter()
        .collect();
        let oc = OrderingConditions::from_dependencies(&deps).unwrap();
        assert_eq!(oc.first(), Some("dpl"));
        assert_eq!(oc.last(), Some("statics"));
        assert!(oc.before().contains("dpl"));
        assert!(oc.before().contains("statics"));
        assert_eq!(oc.before().successors("lessbuilder"), ["dpl", "styler"]);
    }

    #[test]
    fn multiple_first_is_rejected() {
        let deps: FeatureDependencies = [("a", first()), ("b", first())].into_iter().collect();
        assert_eq!(
            OrderingConditions::from_dependencies(&deps).unwrap_err(),
            OrderError::MultipleFirstConditions {
                first: "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn multiple_last_is_rejected() {
        let deps: FeatureDependencies = [("b", last()), ("a", last())].into_iter().collect();
        assert_eq!(
            OrderingConditions::from_dependencies(&deps).unwrap_err(),
            OrderError::MultipleLastConditions {
                first: "b".into(),
                second: "a".into()
            }
        );
    }

    #[test]
    fn after_to_known_last_is_rejected_on_add() {
        let mut oc = OrderingConditions::new();
        oc.add(OrderingCondition::last("statics")).unwrap();
        assert_eq!(
            oc.add(OrderingCondition::after("lessbuilder", "statics")),
            Err(OrderError::AfterConditionToLast {
                feature: "lessbuilder".into(),
                last: "statics".into()
            })
        );
    }

    #[test]
    fn after_to_last_declared_later_is_caught_by_final_pass() {
        let mut oc = OrderingConditions::new();
        oc.add(OrderingCondition::after("lessbuilder", "statics"))
            .unwrap();
        oc.add(OrderingCondition::last("statics")).unwrap();
        assert!(matches!(
            oc.check_after_to_last(),
            Err(OrderError::AfterConditionToLast { .. })
        ));
    }

    #[test]
    fn after_edges_declared_with_first_or_last_are_kept() {
        let deps = FeatureDependencies::from_json(r#"{"x": {"last": true, "after": ["x"]}}"#)
            .unwrap();
        assert_eq!(
            OrderingConditions::from_dependencies(&deps).unwrap_err(),
            OrderError::AfterConditionToLast {
                feature: "x".into(),
                last: "x".into()
            }
        );

        let deps = FeatureDependencies::from_json(r#"{"a": {"first": true, "after": ["b"]}}"#)
            .unwrap();
        let oc = OrderingConditions::from_dependencies(&deps).unwrap();
        assert_eq!(oc.before().successors("a"), ["b"]);
    }

    #[test]
    fn last_may_itself_come_after_others() {
        let deps: FeatureDependencies = [
            (
                "statics",
                FeatureDependency {
                    last: true,
                    after: vec!["lessbuilder".into()],
                    ..Default::default()
                },
            ),
            ("lessbuilder", FeatureDependency::default()),
        ]
        .into_iter()
        .collect();
        assert!(OrderingConditions::from_dependencies(&deps).is_ok());
    }

    #[test]
    fn insert_replaces_existing_declaration_in_place() {
        let mut deps = FeatureDependencies::new();
        deps.insert("a", first());
        deps.insert("b", last());
        deps.insert("a", after(&["b"]));
        let names: Vec<&str> = deps.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(!deps.get("a").unwrap().first);
    }
}
