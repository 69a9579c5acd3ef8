use std::path::{Path, PathBuf};

use ape_util::errors::ApeError;

pub const ENV_ROOT_DIR: &str = "APE_ROOT_DIR";
pub const ENV_CONTAINER_NAME: &str = "CONTAINER_NAME";
pub const ENV_PRODUCT_NAME: &str = "PRODUCT_NAME";
pub const ENV_CONTAINER_DIR: &str = "CONTAINER_DIR";
pub const ENV_FEATUREMODEL_POOL: &str = "FEATUREMODEL_POOL_PATH";

/// Environment of an ape session, read from process environment variables.
///
/// Empty variables count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApeConfig {
    /// `APE_ROOT_DIR`: the directory holding all containers.
    pub root_dir: Option<PathBuf>,
    /// `CONTAINER_NAME`: the active container.
    pub container_name: Option<String>,
    /// `PRODUCT_NAME`: the active product.
    pub product_name: Option<String>,
    /// `CONTAINER_DIR`: directory of the active container.
    pub container_dir: Option<PathBuf>,
    /// `FEATUREMODEL_POOL_PATH`: override for the feature model pool.
    pub featuremodel_pool: Option<PathBuf>,
}

impl ApeConfig {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build a config from explicit `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value: String = value.into();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                ENV_ROOT_DIR => config.root_dir = Some(PathBuf::from(value)),
                ENV_CONTAINER_NAME => config.container_name = Some(value),
                ENV_PRODUCT_NAME => config.product_name = Some(value),
                ENV_CONTAINER_DIR => config.container_dir = Some(PathBuf::from(value)),
                ENV_FEATUREMODEL_POOL => config.featuremodel_pool = Some(PathBuf::from(value)),
                _ => {}
            }
        }
        config
    }

    /// The ape root, required by every container command.
    pub fn root_dir(&self) -> Result<&Path, ApeError> {
        self.root_dir
            .as_deref()
            .ok_or_else(|| ApeError::EnvironmentIncomplete {
                variable: ENV_ROOT_DIR.to_string(),
            })
    }
}
