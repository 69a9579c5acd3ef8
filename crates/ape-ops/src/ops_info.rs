//! Operation: describe the current ape environment.

use std::fmt;
use std::path::PathBuf;

use ape_core::config::ApeConfig;
use ape_core::container::ApeRoot;
use ape_util::errors::ApeResult;

/// Snapshot of the ape root and the active product.
#[derive(Debug, Clone)]
pub struct EnvironmentInfo {
    pub root: PathBuf,
    pub active_container: Option<String>,
    pub active_product: Option<String>,
    /// Containers with their products.
    pub containers: Vec<(String, Vec<String>)>,
}

pub fn info(config: &ApeConfig) -> ApeResult<EnvironmentInfo> {
    let root = ApeRoot::from_config(config)?;
    let mut containers = Vec::new();
    for container in root.containers()? {
        let products = root.products(&container)?;
        containers.push((container, products));
    }
    Ok(EnvironmentInfo {
        root: root.path().to_path_buf(),
        active_container: config.container_name.clone(),
        active_product: config.product_name.clone(),
        containers,
    })
}

impl fmt::Display for EnvironmentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "root directory         : {}", self.root.display())?;
        writeln!(
            f,
            "active container       : {}",
            self.active_container.as_deref().unwrap_or("")
        )?;
        writeln!(
            f,
            "active product         : {}",
            self.active_product.as_deref().unwrap_or("")
        )?;
        writeln!(f)?;
        writeln!(f, "containers and products:")?;
        writeln!(f, "{}", "-".repeat(30))?;
        for (container, products) in &self.containers {
            writeln!(f, "{container}")?;
            for product in products {
                writeln!(f, "    {product}")?;
            }
        }
        Ok(())
    }
}
