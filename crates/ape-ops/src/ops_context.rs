//! Operations: print shell snippets that move the user between products.
//!
//! A process cannot change its parent shell's directory or environment, so
//! these operations only render the commands; the `ape` shell wrapper
//! sources them.

use ape_core::config::ApeConfig;
use ape_core::container::{ApeRoot, Poi};
use ape_core::SOURCE_HEADER;
use ape_util::errors::ApeResult;

/// `cd` into the product directory of `poi`.
pub fn cd(config: &ApeConfig, poi: &str) -> ApeResult<String> {
    let root = ApeRoot::from_config(config)?;
    let poi = Poi::parse(poi, config.container_name.as_deref())?;
    root.locate(&poi)?;
    let dir = root.product_dir(&poi.container, &poi.product);
    Ok(format!("{SOURCE_HEADER}\ncd {}\n", dir.display()))
}

/// Make `poi` the active product.
pub fn switch(config: &ApeConfig, poi: &str) -> ApeResult<String> {
    let root = ApeRoot::from_config(config)?;
    let poi = Poi::parse(poi, config.container_name.as_deref())?;
    root.locate(&poi)?;
    Ok(format!(
        "{SOURCE_HEADER}\n\nexport CONTAINER_NAME={}\nexport PRODUCT_NAME={}\nupdate_ape_env\n",
        poi.container, poi.product
    ))
}

/// [`switch`] and [`cd`] in one step.
pub fn teleport(config: &ApeConfig, poi: &str) -> ApeResult<String> {
    let mut out = switch(config, poi)?;
    out.push_str(&cd(config, poi)?);
    Ok(out)
}
