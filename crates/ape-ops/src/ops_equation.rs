//! Operation: generate a product equation from its FeatureIDE configuration.

use ape_core::config::ApeConfig;
use ape_core::container::resolve_poi;
use ape_core::equation::{config_to_features, write_equation};
use ape_core::featuremodel::{load_feature_dependencies, FeatureModelPaths};
use ape_util::errors::ApeResult;
use ape_util::fs::read_file;

use crate::ops_order::order_features;

/// A freshly written product equation.
pub struct GeneratedEquation {
    pub product: String,
    pub paths: FeatureModelPaths,
    pub features: Vec<String>,
}

/// Regenerate the product equation of `poi` (or of the active product).
pub fn config_to_equation(
    config: &ApeConfig,
    poi: Option<&str>,
) -> ApeResult<GeneratedEquation> {
    let (container_dir, product) = resolve_poi(config, poi)?;
    let paths = FeatureModelPaths::discover(config, &container_dir, &product);
    let features = generate_equation(&paths)?;
    Ok(GeneratedEquation {
        product,
        paths,
        features,
    })
}

/// Translate `paths.config_file`, order its features under
/// `paths.feature_order_json` and write `paths.equation_file`.
pub fn generate_equation(paths: &FeatureModelPaths) -> ApeResult<Vec<String>> {
    tracing::info!("processing {}", paths.config_file.display());
    let content = read_file(&paths.config_file)?;
    let lines = config_to_features(&content);
    let deps = load_feature_dependencies(&paths.feature_order_json)?;
    let features = order_features(&lines, &deps)?;
    write_equation(&paths.equation_file, &features)?;
    Ok(features)
}
