//! Containers and products below the ape root.
//!
//! A container is a directory of the root that has a `products/`
//! sub-directory; each product is a directory inside it.

use std::fmt;
use std::path::{Path, PathBuf};

use ape_util::errors::ApeError;
use ape_util::fs::list_dirs;

use crate::config::{ApeConfig, ENV_CONTAINER_DIR, ENV_PRODUCT_NAME};

pub const PRODUCTS_DIR: &str = "products";

/// The root directory holding all containers.
#[derive(Debug, Clone)]
pub struct ApeRoot {
    root: PathBuf,
}

impl ApeRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &ApeConfig) -> Result<Self, ApeError> {
        Ok(Self::new(config.root_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn container_dir(&self, container: &str) -> PathBuf {
        self.root.join(container)
    }

    pub fn product_dir(&self, container: &str, product: &str) -> PathBuf {
        self.container_dir(container).join(PRODUCTS_DIR).join(product)
    }

    /// Names of all containers, sorted.
    pub fn containers(&self) -> Result<Vec<String>, ApeError> {
        Ok(list_dirs(&self.root)?
            .into_iter()
            .filter(|name| self.container_dir(name).join(PRODUCTS_DIR).is_dir())
            .collect())
    }

    /// Names of the products of `container`, sorted. Entries starting with
    /// `.` or `_` are not products.
    pub fn products(&self, container: &str) -> Result<Vec<String>, ApeError> {
        let products_dir = self.container_dir(container).join(PRODUCTS_DIR);
        Ok(list_dirs(&products_dir)?
            .into_iter()
            .filter(|name| !name.starts_with('.') && !name.starts_with('_'))
            .collect())
    }

    /// Check that the product of interest exists and return its container directory.
    pub fn locate(&self, poi: &Poi) -> Result<PathBuf, ApeError> {
        if !self.containers()?.contains(&poi.container) {
            return Err(ApeError::ContainerNotFound {
                name: poi.container.clone(),
            });
        }
        if !self.products(&poi.container)?.contains(&poi.product) {
            return Err(ApeError::ProductNotFound {
                name: poi.product.clone(),
            });
        }
        Ok(self.container_dir(&poi.container))
    }
}

/// A product of interest: `<container>:<product>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poi {
    pub container: String,
    pub product: String,
}

impl Poi {
    /// Parse `<container>:<product>`, or a bare `<product>` inside the
    /// active container.
    pub fn parse(poi: &str, active_container: Option<&str>) -> Result<Self, ApeError> {
        let parts: Vec<&str> = poi.split(':').collect();
        match (parts.as_slice(), active_container) {
            ([container, product], _) if !container.is_empty() && !product.is_empty() => {
                Ok(Self {
                    container: container.to_string(),
                    product: product.to_string(),
                })
            }
            ([product], Some(container)) if !product.is_empty() => Ok(Self {
                container: container.to_string(),
                product: product.to_string(),
            }),
            _ => Err(ApeError::InvalidPoi {
                poi: poi.to_string(),
            }),
        }
    }
}

impl fmt::Display for Poi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.container, self.product)
    }
}

/// Resolve the container directory and product name to operate on.
///
/// An explicit `poi` must name an existing container and product; without
/// one the active `CONTAINER_DIR` and `PRODUCT_NAME` are used.
pub fn resolve_poi(config: &ApeConfig, poi: Option<&str>) -> Result<(PathBuf, String), ApeError> {
    if let Some(poi) = poi {
        let root = ApeRoot::from_config(config)?;
        let poi = Poi::parse(poi, None)?;
        let container_dir = root.locate(&poi)?;
        return Ok((container_dir, poi.product));
    }

    let container_dir =
        config
            .container_dir
            .clone()
            .ok_or_else(|| ApeError::EnvironmentIncomplete {
                variable: ENV_CONTAINER_DIR.to_string(),
            })?;
    let product = config
        .product_name
        .clone()
        .ok_or_else(|| ApeError::EnvironmentIncomplete {
            variable: ENV_PRODUCT_NAME.to_string(),
        })?;
    Ok((container_dir, product))
}
