//! Feature model pool: feature order constraints, FeatureIDE model files
//! and per-product configurations.

use std::path::{Path, PathBuf};

use ape_feaquencer::FeatureDependencies;
use ape_util::errors::ApeError;
use ape_util::fs::read_file;
use ape_util::process::CommandBuilder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::de::DeserializeOwned;

use crate::config::ApeConfig;
use crate::equation::{equation_path, EQUATION_CONFIG_FILE};

pub const FEATUREMODEL_DIR: &str = "featuremodel";
pub const FEATURE_ORDER_JSON: &str = "feature_order.json";
pub const MODEL_XML: &str = "model.xml";
pub const PRODUCT_SPEC_JSON: &str = "product_spec.json";

/// Locate the feature model pool.
///
/// `FEATUREMODEL_POOL_PATH` wins over `<APE_ROOT_DIR>/featuremodel`. When
/// the chosen directory does not exist, the container's own
/// `_lib/featuremodel` is used.
pub fn featuremodel_pool(config: &ApeConfig, container_dir: &Path) -> PathBuf {
    let candidate = config
        .featuremodel_pool
        .clone()
        .or_else(|| config.root_dir.as_ref().map(|r| r.join(FEATUREMODEL_DIR)));
    match candidate {
        Some(pool) if pool.is_dir() => pool,
        other => {
            if let Some(pool) = other {
                tracing::debug!("feature model pool {} not found", pool.display());
            }
            container_dir.join("_lib").join(FEATUREMODEL_DIR)
        }
    }
}

/// Repository name of a container, from its `origin` remote.
///
/// A container checked out as `git clone .../sdox.git sdox-1` is still
/// named `sdox` in the feature model pool. Falls back to the directory name
/// when git cannot tell.
pub fn repo_name(container_dir: &Path) -> String {
    let url = CommandBuilder::new("git")
        .args(["config", "--get", "remote.origin.url"])
        .cwd(container_dir)
        .stdout();
    match url {
        Ok(url) if !url.is_empty() => repo_name_from_url(&url),
        other => {
            if let Err(e) = other {
                tracing::debug!("could not read origin of {}: {e}", container_dir.display());
            }
            container_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        }
    }
}

/// `https://host/foo/bar.git` and `git@host:bar.git` both name `bar`.
pub fn repo_name_from_url(url: &str) -> String {
    let tail = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    let tail = tail.rsplit(':').next().unwrap_or(tail);
    tail.split(".git").next().unwrap_or(tail).to_string()
}

/// Every feature model file relevant to one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureModelPaths {
    pub feature_order_json: PathBuf,
    pub model_xml: PathBuf,
    pub config_file: PathBuf,
    pub equation_file: PathBuf,
    pub product_spec: PathBuf,
}

impl FeatureModelPaths {
    pub fn new(pool: &Path, container_dir: &Path, repo_name: &str, product: &str) -> Self {
        let productline = pool.join("productline");
        let products = productline.join("products").join(repo_name);
        Self {
            feature_order_json: productline.join(FEATURE_ORDER_JSON),
            model_xml: productline.join(MODEL_XML),
            config_file: products.join(product).join(EQUATION_CONFIG_FILE),
            equation_file: equation_path(container_dir, product),
            product_spec: products.join(PRODUCT_SPEC_JSON),
        }
    }

    /// Resolve the pool and repository name for `container_dir`.
    pub fn discover(config: &ApeConfig, container_dir: &Path, product: &str) -> Self {
        let pool = featuremodel_pool(config, container_dir);
        let repo = repo_name(container_dir);
        tracing::debug!("feature model pool {} (repo {repo})", pool.display());
        Self::new(&pool, container_dir, &repo, product)
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ApeError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|source| ApeError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `feature_order.json` as ordering declarations for the resolver.
pub fn load_feature_dependencies(path: &Path) -> Result<FeatureDependencies, ApeError> {
    read_json(path)
}

/// Feature names listed under `<featureOrder>` in a FeatureIDE model, in
/// document order. A model without a feature order yields an empty list.
pub fn extract_feature_order(xml: &str) -> Result<Vec<String>, ApeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut order_depth: Option<usize> = None;
    let mut features = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                match order_depth {
                    Some(d) if depth == d + 1 => features.push(feature_name(e)?),
                    None if depth == 2 && e.name().as_ref() == b"featureOrder" => {
                        order_depth = Some(depth);
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => match order_depth {
                Some(d) if depth == d => features.push(feature_name(e)?),
                None if depth == 1 && e.name().as_ref() == b"featureOrder" => {
                    return Ok(features);
                }
                _ => {}
            },
            Ok(Event::End(_)) => {
                if order_depth == Some(depth) {
                    return Ok(features);
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(e)),
            _ => {}
        }
    }
    Ok(features)
}

/// Read a FeatureIDE `model.xml` and extract its feature order.
pub fn read_feature_order(path: &Path) -> Result<Vec<String>, ApeError> {
    extract_feature_order(&read_file(path)?)
}

fn feature_name(e: &BytesStart<'_>) -> Result<String, ApeError> {
    let attr = e
        .try_get_attribute("name")
        .map_err(xml_error)?
        .ok_or_else(|| ApeError::Xml {
            message: format!(
                "<{}> in featureOrder has no name attribute",
                String::from_utf8_lossy(e.name().as_ref())
            ),
        })?;
    Ok(attr.unescape_value().map_err(xml_error)?.into_owned())
}

fn xml_error(e: impl std::fmt::Display) -> ApeError {
    ApeError::Xml {
        message: e.to_string(),
    }
}
