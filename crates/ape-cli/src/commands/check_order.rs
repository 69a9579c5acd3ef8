//! Handler for `ape check-order`.

use std::path::Path;

use miette::Result;

use ape_core::config::ApeConfig;
use ape_core::validators::{ValidationMode, Violation};
use ape_ops::ops_validate;
use ape_util::errors::ApeError;
use ape_util::progress::status;

pub fn exec(features: &Path, constraints: &Path, strict: bool) -> Result<()> {
    let violations = ops_validate::check_order(features, constraints, mode(strict))?;
    report(features, &violations)
}

/// Check the product line `model.xml` of `poi` or the active product.
pub fn exec_model(poi: Option<&str>, strict: bool) -> Result<()> {
    let (model, violations) =
        ops_validate::check_model_order(&ApeConfig::from_env(), poi, mode(strict))?;
    report(&model, &violations)
}

fn mode(strict: bool) -> ValidationMode {
    if strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Tolerant
    }
}

fn report(features: &Path, violations: &[Violation]) -> Result<()> {
    if violations.is_empty() {
        status("Order", &format!("{} is valid", features.display()));
        return Ok(());
    }
    for violation in violations {
        println!("{violation}");
    }
    Err(ApeError::Validation {
        message: format!("{} order violation(s)", violations.len()),
    }
    .into())
}
