use miette::Result;

use ape_core::config::ApeConfig;

pub fn exec() -> Result<()> {
    let info = ape_ops::ops_info::info(&ApeConfig::from_env())?;
    print!("{info}");
    Ok(())
}
