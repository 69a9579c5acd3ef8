use std::path::Path;

use miette::Result;

pub fn exec(constraints: &Path, equation: Option<&Path>) -> Result<()> {
    print!("{}", ape_ops::ops_graph::graph(constraints, equation)?);
    Ok(())
}
