//! Checks a feature list against a functional product specification.

use std::path::Path;

use ape_util::errors::ApeError;
use serde::Deserialize;

use crate::featuremodel::read_json;

/// One entry of `product_spec.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductSpec {
    /// Products this entry applies to.
    #[serde(default)]
    pub products: Vec<String>,
    /// Features every such product must contain.
    #[serde(default)]
    pub mandatory: Vec<String>,
    /// Features no such product may contain.
    #[serde(default)]
    pub never: Vec<String>,
}

impl ProductSpec {
    /// The first entry that applies to `product`.
    pub fn find(entries: Vec<ProductSpec>, product: &str) -> Option<ProductSpec> {
        entries
            .into_iter()
            .find(|entry| entry.products.iter().any(|p| p == product))
    }

    /// Read `product_spec.json` and pick the entry for `product`.
    pub fn from_path(path: &Path, product: &str) -> Result<Option<ProductSpec>, ApeError> {
        let entries: Vec<ProductSpec> = read_json(path)?;
        Ok(Self::find(entries, product))
    }
}

pub struct ProductSpecValidator {
    spec: ProductSpec,
    feature_list: Vec<String>,
    errors_mandatory: Vec<String>,
    errors_never: Vec<String>,
}

impl ProductSpecValidator {
    pub fn new<S: AsRef<str>>(spec: ProductSpec, feature_list: &[S]) -> Self {
        Self {
            spec,
            feature_list: feature_list.iter().map(|f| f.as_ref().to_string()).collect(),
            errors_mandatory: Vec::new(),
            errors_never: Vec::new(),
        }
    }

    /// Check that all mandatory features are present and no "never"
    /// feature is. Spec names may use the `__` spelling.
    pub fn is_valid(&mut self) -> bool {
        let contains = |feature: &str| {
            let dotted = feature.replace("__", ".");
            self.feature_list.iter().any(|f| *f == dotted)
        };
        self.errors_mandatory = self
            .spec
            .mandatory
            .iter()
            .filter(|f| !contains(f))
            .cloned()
            .collect();
        self.errors_never = self
            .spec
            .never
            .iter()
            .filter(|f| contains(f))
            .cloned()
            .collect();
        !self.has_errors()
    }

    /// Mandatory features missing from the list.
    pub fn errors_mandatory(&self) -> &[String] {
        &self.errors_mandatory
    }

    /// Forbidden features contained in the list.
    pub fn errors_never(&self) -> &[String] {
        &self.errors_never
    }

    pub fn has_errors(&self) -> bool {
        !self.errors_mandatory.is_empty() || !self.errors_never.is_empty()
    }
}
