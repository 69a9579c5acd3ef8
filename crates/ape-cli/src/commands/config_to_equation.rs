//! Handler for `ape config-to-equation`.

use miette::Result;

use ape_core::config::ApeConfig;
use ape_ops::ops_equation;
use ape_ops::ops_validate::validate_with_paths;
use ape_util::progress::status;

use super::validate::print_report;

pub fn exec(poi: Option<&str>) -> Result<()> {
    let generated = ops_equation::config_to_equation(&ApeConfig::from_env(), poi)?;
    status(
        "Generated",
        &format!(
            "{} ({} features)",
            generated.paths.equation_file.display(),
            generated.features.len()
        ),
    );
    let report = validate_with_paths(&generated.paths, &generated.product)?;
    print_report(&report)
}
