//! Handler for `ape validate`.

use miette::Result;

use ape_core::config::ApeConfig;
use ape_ops::ops_validate::{self, SpecCheck, ValidationReport};
use ape_util::errors::ApeError;
use ape_util::progress::{status, status_error, status_info, status_warn};

pub fn exec(poi: Option<&str>) -> Result<()> {
    let report = ops_validate::validate_product_equation(&ApeConfig::from_env(), poi)?;
    print_report(&report)
}

/// Print a validation report; fails when it contains errors.
pub fn print_report(report: &ValidationReport) -> Result<()> {
    status_info("Validating", &report.equation.display().to_string());

    if report.violations.is_empty() {
        status("Order", "ok");
    } else {
        for violation in &report.violations {
            status_error("Order", &violation.to_string());
        }
    }

    match &report.spec {
        SpecCheck::Skipped { path } => {
            status_warn("Skipped", &format!("no product spec at {}", path.display()));
        }
        SpecCheck::NoEntry => status_warn("Skipped", "product spec has no entry for product"),
        SpecCheck::Checked { missing, forbidden } => {
            for feature in missing {
                status_error("Missing", &format!("mandatory feature {feature}"));
            }
            for feature in forbidden {
                status_error("Forbidden", &format!("feature {feature} must never be selected"));
            }
            if missing.is_empty() && forbidden.is_empty() {
                status("Spec", "ok");
            }
        }
    }

    if report.has_errors() {
        return Err(ApeError::Validation {
            message: format!("{} is invalid", report.equation.display()),
        }
        .into());
    }
    Ok(())
}
