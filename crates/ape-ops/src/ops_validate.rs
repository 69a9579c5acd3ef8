//! Operation: validate a product equation against the feature model.

use std::path::{Path, PathBuf};

use ape_core::config::ApeConfig;
use ape_core::container::resolve_poi;
use ape_core::equation::read_equation;
use ape_core::featuremodel::{read_feature_order, read_json, FeatureModelPaths};
use ape_core::validators::{
    FeatureOrderValidator, OrderConstraints, ProductSpec, ProductSpecValidator, ValidationMode,
    Violation,
};
use ape_util::errors::ApeResult;

/// Outcome of the functional product spec check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecCheck {
    /// No `product_spec.json` exists for the container.
    Skipped { path: PathBuf },
    /// The spec file has no entry for the product.
    NoEntry,
    Checked {
        missing: Vec<String>,
        forbidden: Vec<String>,
    },
}

/// Result of validating one product equation.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub equation: PathBuf,
    pub violations: Vec<Violation>,
    pub spec: SpecCheck,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        let spec_failed = matches!(
            &self.spec,
            SpecCheck::Checked { missing, forbidden } if !missing.is_empty() || !forbidden.is_empty()
        );
        !self.violations.is_empty() || spec_failed
    }
}

/// Validate the product equation of `poi` (or of the active product).
pub fn validate_product_equation(
    config: &ApeConfig,
    poi: Option<&str>,
) -> ApeResult<ValidationReport> {
    let (container_dir, product) = resolve_poi(config, poi)?;
    let paths = FeatureModelPaths::discover(config, &container_dir, &product);
    validate_with_paths(&paths, &product)
}

/// Validate `paths.equation_file` for `product`.
pub fn validate_with_paths(
    paths: &FeatureModelPaths,
    product: &str,
) -> ApeResult<ValidationReport> {
    let features = read_equation(&paths.equation_file)?;
    let constraints: OrderConstraints = read_json(&paths.feature_order_json)?;

    let mut validator = FeatureOrderValidator::new(&features, &constraints);
    validator.check_order()?;
    let violations = validator.violations().to_vec();

    let spec = if !paths.product_spec.is_file() {
        tracing::debug!("no product spec at {}", paths.product_spec.display());
        SpecCheck::Skipped {
            path: paths.product_spec.clone(),
        }
    } else {
        match ProductSpec::from_path(&paths.product_spec, product)? {
            None => SpecCheck::NoEntry,
            Some(spec) => {
                let mut spec_validator = ProductSpecValidator::new(spec, &features);
                spec_validator.is_valid();
                SpecCheck::Checked {
                    missing: spec_validator.errors_mandatory().to_vec(),
                    forbidden: spec_validator.errors_never().to_vec(),
                }
            }
        }
    };

    Ok(ValidationReport {
        equation: paths.equation_file.clone(),
        violations,
        spec,
    })
}

/// Check the order of a feature list file against order constraints.
///
/// `features` is either a FeatureIDE `model.xml` (its feature order is
/// used) or an equation file.
pub fn check_order(
    features: &Path,
    constraints: &Path,
    mode: ValidationMode,
) -> ApeResult<Vec<Violation>> {
    let feature_list = if features.extension().is_some_and(|ext| ext == "xml") {
        read_feature_order(features)?
    } else {
        read_equation(features)?
    };
    let constraints: OrderConstraints = read_json(constraints)?;
    let mut validator = FeatureOrderValidator::new(&feature_list, &constraints).with_mode(mode);
    validator.check_order()?;
    Ok(validator.violations().to_vec())
}

/// Check the feature order of the product line's `model.xml`, found
/// through `poi` (or the active product), against its `feature_order.json`.
///
/// Returns the checked model path with the violations found.
pub fn check_model_order(
    config: &ApeConfig,
    poi: Option<&str>,
    mode: ValidationMode,
) -> ApeResult<(PathBuf, Vec<Violation>)> {
    let (container_dir, product) = resolve_poi(config, poi)?;
    let paths = FeatureModelPaths::discover(config, &container_dir, &product);
    let violations = check_order(&paths.model_xml, &paths.feature_order_json, mode)?;
    Ok((paths.model_xml, violations))
}
