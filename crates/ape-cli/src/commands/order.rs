//! Handler for `ape order`.

use std::path::Path;

use miette::Result;

pub fn exec(equation: &Path, constraints: &Path) -> Result<()> {
    for feature in ape_ops::ops_order::order_equation(equation, constraints)? {
        println!("{feature}");
    }
    Ok(())
}
