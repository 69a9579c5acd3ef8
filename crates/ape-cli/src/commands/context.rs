//! Handlers for `ape cd`, `ape switch` and `ape teleport`.

use miette::Result;

use ape_core::config::ApeConfig;
use ape_ops::ops_context;

pub fn cd(poi: &str) -> Result<()> {
    print!("{}", ops_context::cd(&ApeConfig::from_env(), poi)?);
    Ok(())
}

pub fn switch(poi: &str) -> Result<()> {
    print!("{}", ops_context::switch(&ApeConfig::from_env(), poi)?);
    Ok(())
}

pub fn teleport(poi: &str) -> Result<()> {
    print!("{}", ops_context::teleport(&ApeConfig::from_env(), poi)?);
    Ok(())
}
